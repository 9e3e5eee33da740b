use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/flows/generate_sql_query",
            post(handlers::generate_sql_query_handler),
        )
        .route(
            "/flows/generate_mock_data",
            post(handlers::generate_mock_data_handler),
        )
        .route(
            "/flows/test_generated_sql_query",
            post(handlers::test_generated_sql_query_handler),
        )
        .route("/generate", post(handlers::generate_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

//! # Request Handlers
//!
//! One handler per flow endpoint, plus the orchestrated `/generate` handler
//! that runs the full SQL-then-mock-data sequence the way an interactive
//! client does.

use crate::errors::AppError;
use crate::state::AppState;
use crate::types::{GenerateRequest, GenerateResponse};
use axum::{extract::State, Json};
use sqlgenius::{
    session::VALIDATION_NOTICE, FlowError, GenerateMockDataInput, GenerateMockDataOutput,
    GenerateSqlQueryInput, GenerateSqlQueryOutput, GenerationSession, TestGeneratedSqlQueryInput,
    TestGeneratedSqlQueryOutput,
};
use tracing::info;

/// The root handler.
pub async fn root() -> &'static str {
    "sqlgenius server is running."
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for the SQL generation flow.
pub async fn generate_sql_query_handler(
    State(app_state): State<AppState>,
    Json(input): Json<GenerateSqlQueryInput>,
) -> Result<Json<GenerateSqlQueryOutput>, AppError> {
    info!("Received SQL generation request");
    let output = app_state.client.generate_sql_query(input).await?;
    Ok(Json(output))
}

/// The handler for the mock data generation flow.
pub async fn generate_mock_data_handler(
    State(app_state): State<AppState>,
    Json(input): Json<GenerateMockDataInput>,
) -> Result<Json<GenerateMockDataOutput>, AppError> {
    info!("Received mock data generation request");
    let output = app_state.client.generate_mock_data(input).await?;
    Ok(Json(output))
}

/// The handler for the query-test flow.
///
/// Non-functional by design: the flow routes through the placeholder
/// `executeSqlQuery` capability and always answers with its canned result.
pub async fn test_generated_sql_query_handler(
    State(app_state): State<AppState>,
    Json(input): Json<TestGeneratedSqlQueryInput>,
) -> Result<Json<TestGeneratedSqlQueryOutput>, AppError> {
    info!("Received query test request");
    let output = app_state.client.test_generated_sql_query(input).await?;
    Ok(Json(output))
}

/// The handler for the orchestrated `/generate` endpoint.
///
/// Runs both flows strictly in sequence over a per-request session and
/// reports the terminal state: the generated SQL with decoded rows, or one
/// of the two failure outcomes. Empty inputs are rejected before any
/// provider traffic.
pub async fn generate_handler(
    State(app_state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    info!("Received generate request");

    let session = GenerationSession::new(app_state.client.clone());
    let outcome = session
        .generate(
            &request.schema_definition,
            &request.natural_language_question,
        )
        .await
        .map_err(|e| match e {
            FlowError::EmptyInput { .. } => AppError::Validation(VALIDATION_NOTICE.to_string()),
            other => AppError::Flow(other),
        })?;

    Ok(Json(GenerateResponse::from(outcome)))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlgenius::FlowError;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the different kinds of errors that can occur
/// within the server, allowing them to be converted into appropriate HTTP
/// responses.
pub enum AppError {
    /// Errors originating from the `sqlgenius` flow layer.
    Flow(FlowError),
    /// Rejected input, surfaced with a user-facing notice.
    Validation(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<FlowError> for AppError {
    fn from(err: FlowError) -> Self {
        AppError::Flow(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Flow(err) => {
                error!("FlowError: {:?}", err);
                match err {
                    FlowError::EmptyInput { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                    }
                    FlowError::GenerationInFlight => (StatusCode::CONFLICT, err.to_string()),
                    FlowError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    FlowError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    FlowError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    FlowError::OutputContract { flow, message } => (
                        StatusCode::BAD_GATEWAY,
                        format!("Flow '{flow}' returned output violating its contract: {message}"),
                    ),
                    FlowError::Tool { tool, message } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Capability '{tool}' failed: {message}"),
                    ),
                    FlowError::MissingAiProvider(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    FlowError::Regex(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Internal regex error: {e}"),
                    ),
                    FlowError::Json(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize result: {e}"),
                    ),
                    FlowError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                }
            }
            AppError::Validation(notice) => (StatusCode::UNPROCESSABLE_ENTITY, notice),
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

use thiserror::Error;

/// Custom error types for the flow layer.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("Flow '{flow}' requires a non-empty '{field}'")]
    EmptyInput {
        flow: &'static str,
        field: &'static str,
    },
    #[error("Flow '{flow}' output did not match its contract: {message}")]
    OutputContract { flow: String, message: String },
    #[error("Capability '{tool}' failed: {message}")]
    Tool { tool: String, message: String },
    #[error("A generation is already in flight")]
    GenerationInFlight,
    #[error("AI provider is missing: {0}")]
    MissingAiProvider(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

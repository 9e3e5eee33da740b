//! # Wire Types
//!
//! Request and response records for the orchestrated `/generate` endpoint.
//! The per-flow endpoints reuse the flow input/output records from the
//! library directly.

use serde::{Deserialize, Serialize};
use sqlgenius::mock_data::MockRow;
use sqlgenius::GenerationOutcome;

/// The request body for the `/generate` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub schema_definition: String,
    pub natural_language_question: String,
}

/// The terminal state of a generation run.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenerateStatus {
    Success,
    SqlError,
    DataFormatError,
}

/// The response body for the `/generate` endpoint, mirroring the terminal
/// states of the generation state machine.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub status: GenerateStatus,
    /// Present on success and on a data-format failure (the SQL is retained
    /// even when the mock data could not be decoded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<MockRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Whether every mock row shares the first row's column set; a client
    /// should caveat the rendered table when false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_columns: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<GenerationOutcome> for GenerateResponse {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Success { sql_query, dataset } => GenerateResponse {
                status: GenerateStatus::Success,
                sql_query: Some(sql_query),
                columns: Some(dataset.columns()),
                consistent_columns: Some(dataset.has_consistent_columns()),
                rows: Some(dataset.rows().to_vec()),
                error: None,
            },
            GenerationOutcome::SqlError { message } => GenerateResponse {
                status: GenerateStatus::SqlError,
                sql_query: None,
                rows: None,
                columns: None,
                consistent_columns: None,
                error: Some(message),
            },
            GenerationOutcome::DataFormatError { sql_query, message } => GenerateResponse {
                status: GenerateStatus::DataFormatError,
                sql_query: Some(sql_query),
                rows: None,
                columns: None,
                consistent_columns: None,
                error: Some(message),
            },
        }
    }
}

//! # Generation Session
//!
//! The orchestration sequence behind the single user-initiated "Generate"
//! action: generate SQL from the question, then fabricate mock rows for the
//! generated query, strictly in that order. The session owns the state
//! machine a client renders from:
//!
//! `Idle -> GeneratingSql -> GeneratingMockData -> Finished(outcome)`
//!
//! Every terminal outcome is re-enterable; a new run clears prior state
//! first. Overlapping runs are fenced: a second `generate` while one is in
//! flight fails with `FlowError::GenerationInFlight` and leaves all state
//! untouched, rather than racing last-write-wins on the shared outcome.

use crate::errors::FlowError;
use crate::mock_data::MockDataset;
use crate::types::{GenerateMockDataInput, GenerateSqlQueryInput, GeniusClient};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// The transient notice shown when the entry guard rejects empty inputs.
pub const VALIDATION_NOTICE: &str = "Please provide both a database schema and a question.";

/// The user-facing message for a failed generation run.
pub const GENERATION_FAILURE_MESSAGE: &str =
    "Failed to generate SQL query or mock data. Please try again.";

/// The user-facing message when the mock data string is not valid JSON.
pub const DATA_FORMAT_MESSAGE: &str =
    "Failed to parse mock data. The generated data was not valid JSON.";

/// A terminal result of one generation run.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationOutcome {
    /// Both flows succeeded and the mock data decoded into rows.
    Success {
        sql_query: String,
        dataset: MockDataset,
    },
    /// One of the model calls failed; nothing is retained from this run.
    SqlError { message: String },
    /// The SQL was generated but the mock data string was not valid JSON.
    /// The query is retained so it can still be displayed.
    DataFormatError {
        sql_query: String,
        message: String,
    },
}

/// The observable state of the session.
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationState {
    Idle,
    GeneratingSql,
    GeneratingMockData,
    Finished(GenerationOutcome),
}

/// Drives the two-flow generation sequence and holds its state.
pub struct GenerationSession {
    client: Arc<GeniusClient>,
    state: Mutex<GenerationState>,
    in_flight: AtomicBool,
}

/// Releases the in-flight fence when a run ends, on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl GenerationSession {
    pub fn new(client: Arc<GeniusClient>) -> Self {
        Self {
            client,
            state: Mutex::new(GenerationState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    /// A snapshot of the current state.
    pub async fn state(&self) -> GenerationState {
        self.state.lock().await.clone()
    }

    /// Whether a generation run is currently in flight. A client should
    /// disable its trigger control while this is true.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Runs the full generation sequence for one schema/question pair.
    ///
    /// The entry guard rejects an empty schema or question with
    /// `FlowError::EmptyInput` without touching prior state, so a validation
    /// notice never destroys the previous run's results. Flow failures are
    /// not errors at this level: they are terminal outcomes of the run.
    pub async fn generate(
        &self,
        schema_definition: &str,
        natural_language_question: &str,
    ) -> Result<GenerationOutcome, FlowError> {
        if schema_definition.trim().is_empty() {
            return Err(FlowError::EmptyInput {
                flow: "generate",
                field: "schemaDefinition",
            });
        }
        if natural_language_question.trim().is_empty() {
            return Err(FlowError::EmptyInput {
                flow: "generate",
                field: "naturalLanguageQuestion",
            });
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(FlowError::GenerationInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        // Clear prior query/dataset/error state before the first call.
        *self.state.lock().await = GenerationState::GeneratingSql;
        info!("[generate] run started");

        let sql_result = self
            .client
            .generate_sql_query(GenerateSqlQueryInput {
                schema_definition: schema_definition.to_string(),
                natural_language_question: natural_language_question.to_string(),
            })
            .await;

        let sql_query = match sql_result {
            Ok(output) => output.sql_query,
            Err(e) => {
                warn!("[generate] SQL generation failed: {e}");
                return Ok(self
                    .finish(GenerationOutcome::SqlError {
                        message: GENERATION_FAILURE_MESSAGE.to_string(),
                    })
                    .await);
            }
        };

        *self.state.lock().await = GenerationState::GeneratingMockData;

        let mock_result = self
            .client
            .generate_mock_data(GenerateMockDataInput {
                schema_definition: schema_definition.to_string(),
                sql_query: sql_query.clone(),
            })
            .await;

        let mock_data = match mock_result {
            Ok(output) => output.mock_data,
            Err(e) => {
                warn!("[generate] mock data generation failed: {e}");
                return Ok(self
                    .finish(GenerationOutcome::SqlError {
                        message: GENERATION_FAILURE_MESSAGE.to_string(),
                    })
                    .await);
            }
        };

        let outcome = match MockDataset::parse(&mock_data) {
            Ok(dataset) => {
                if !dataset.has_consistent_columns() {
                    warn!("[generate] mock data rows do not share a column set");
                }
                GenerationOutcome::Success { sql_query, dataset }
            }
            Err(e) => {
                warn!("[generate] mock data was not decodable: {e}");
                GenerationOutcome::DataFormatError {
                    sql_query,
                    message: DATA_FORMAT_MESSAGE.to_string(),
                }
            }
        };

        Ok(self.finish(outcome).await)
    }

    async fn finish(&self, outcome: GenerationOutcome) -> GenerationOutcome {
        *self.state.lock().await = GenerationState::Finished(outcome.clone());
        outcome
    }
}

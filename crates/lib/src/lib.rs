//! # SQL Genius
//!
//! This crate turns a pasted database schema and an English question into a
//! SQL query, then fabricates plausible sample result rows, through a small
//! set of schema-validated, LLM-backed flows. It also carries the
//! orchestration state machine a client drives ("Generate" runs both flows
//! in sequence) and the device-local schema history a client persists
//! uploads into.
//!
//! The flows are stateless prompt wrappers over a configurable
//! [`providers::ai::AiProvider`]; nothing here parses SQL or talks to a real
//! database. The query-test flow in particular is an explicit placeholder
//! (see [`tools::PlaceholderSqlExecutor`]).

pub mod errors;
pub mod flow;
pub mod history;
pub mod mock_data;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod tools;
pub mod types;

pub use errors::FlowError;
pub use mock_data::{DataFormatError, MockDataset};
pub use session::{GenerationOutcome, GenerationSession, GenerationState};
pub use types::{
    GenerateMockDataInput, GenerateMockDataOutput, GenerateSqlQueryInput, GenerateSqlQueryOutput,
    GeniusClient, GeniusClientBuilder, TestGeneratedSqlQueryInput, TestGeneratedSqlQueryOutput,
};

use flow::{MOCK_DATA_FLOW, SQL_GENERATION_FLOW};
use tracing::info;

impl GeniusClient {
    /// Generates a SQL query from a natural language question and a schema.
    ///
    /// One model call against the fixed SQL-generation template. The output
    /// contract requires a single non-empty `sqlQuery` field; a provider
    /// failure or a response that does not decode into the contract fails
    /// the flow, with no retry and no partial result.
    pub async fn generate_sql_query(
        &self,
        input: GenerateSqlQueryInput,
    ) -> Result<GenerateSqlQueryOutput, FlowError> {
        info!("[generate_sql_query] received question: {:?}", input.natural_language_question);

        let output: GenerateSqlQueryOutput = SQL_GENERATION_FLOW
            .execute(
                self.ai_provider.as_ref(),
                &[
                    ("schemaDefinition", &input.schema_definition),
                    (
                        "naturalLanguageQuestion",
                        &input.natural_language_question,
                    ),
                ],
            )
            .await?;

        if output.sql_query.trim().is_empty() {
            return Err(FlowError::OutputContract {
                flow: SQL_GENERATION_FLOW.name.to_string(),
                message: "sqlQuery must be a non-empty string".to_string(),
            });
        }

        Ok(output)
    }

    /// Fabricates mock result rows for a generated SQL query.
    ///
    /// The returned `mock_data` is a JSON-encoded string; this flow never
    /// parses it. Decode it with [`MockDataset::parse`], which reports the
    /// distinct, recoverable [`DataFormatError`] when the model's string is
    /// not a valid JSON array of objects.
    pub async fn generate_mock_data(
        &self,
        input: GenerateMockDataInput,
    ) -> Result<GenerateMockDataOutput, FlowError> {
        info!("[generate_mock_data] received query: {:?}", input.sql_query);

        MOCK_DATA_FLOW
            .execute(
                self.ai_provider.as_ref(),
                &[
                    ("schemaDefinition", &input.schema_definition),
                    ("sqlQuery", &input.sql_query),
                ],
            )
            .await
    }

    /// Tests a generated SQL query against a database URI.
    ///
    /// The flow routes through the registered `executeSqlQuery` capability.
    /// With the default [`tools::PlaceholderSqlExecutor`] this is
    /// non-functional: it always reports a canned success string populated
    /// with the inputs and never opens a connection. `db_uri` is not
    /// validated.
    pub async fn test_generated_sql_query(
        &self,
        input: TestGeneratedSqlQueryInput,
    ) -> Result<TestGeneratedSqlQueryOutput, FlowError> {
        info!(
            "[test_generated_sql_query] invoking capability '{}'",
            self.sql_executor.name()
        );

        let args = serde_json::to_value(&input)?;
        let value = self.sql_executor.invoke(args).await?;

        serde_json::from_value(value).map_err(|e| FlowError::OutputContract {
            flow: "testGeneratedSqlQueryFlow".to_string(),
            message: e.to_string(),
        })
    }
}

use crate::errors::FlowError;
use crate::providers::ai::AiProvider;
use crate::tools::{PlaceholderSqlExecutor, Tool};
use serde::{Deserialize, Serialize};

/// A client exposing the schema-validated, LLM-backed flows.
///
/// The client is stateless: it holds no entity across calls and every flow
/// is a single request/response operation against the configured AI
/// provider, except for the query-test flow which routes through the
/// registered SQL capability.
#[derive(Clone, Debug)]
pub struct GeniusClient {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) sql_executor: Box<dyn Tool>,
}

/// A builder for creating `GeniusClient` instances.
#[derive(Default)]
pub struct GeniusClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    sql_executor: Option<Box<dyn Tool>>,
}

impl GeniusClientBuilder {
    /// Creates a new `GeniusClientBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider backing the generation flows.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Replaces the SQL execution capability used by the query-test flow.
    ///
    /// By default the client registers the non-functional
    /// [`PlaceholderSqlExecutor`]; a real database-backed implementation can
    /// be substituted here without touching the flow's control structure.
    pub fn sql_executor(mut self, tool: Box<dyn Tool>) -> Self {
        self.sql_executor = Some(tool);
        self
    }

    /// Builds the `GeniusClient`.
    ///
    /// Fails with `FlowError::MissingAiProvider` when no AI provider was
    /// configured. The SQL capability falls back to the placeholder.
    pub fn build(self) -> Result<GeniusClient, FlowError> {
        let ai_provider = self.ai_provider.ok_or_else(|| {
            FlowError::MissingAiProvider(
                "an AI provider must be configured before building the client".to_string(),
            )
        })?;

        Ok(GeniusClient {
            ai_provider,
            sql_executor: self
                .sql_executor
                .unwrap_or_else(|| Box::new(PlaceholderSqlExecutor)),
        })
    }
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider (e.g., "gemini", "local").
    pub provider: String,
    /// The API URL. Optional for Gemini, where it can be derived from the model name.
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    pub api_key: Option<String>,
    /// The model to request, where the provider supports selecting one.
    pub model_name: Option<String>,
}

// --- Flow input and output records ---
//
// Field names are camelCase on the wire. These records are the flow
// contracts: inputs are embedded verbatim into the prompt templates and
// outputs are decoded from the model's JSON response.

/// Input for the SQL generation flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSqlQueryInput {
    /// The database schema definition.
    pub schema_definition: String,
    /// The natural language question to convert to SQL.
    pub natural_language_question: String,
}

/// Output of the SQL generation flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSqlQueryOutput {
    /// The generated SQL query that answers the natural language question.
    pub sql_query: String,
}

/// Input for the mock data generation flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMockDataInput {
    /// The database schema definition.
    pub schema_definition: String,
    /// The SQL query to generate mock data for.
    pub sql_query: String,
}

/// Output of the mock data generation flow.
///
/// `mock_data` is a JSON-encoded array of objects. The flow itself never
/// parses it; decoding belongs to the caller via
/// [`crate::mock_data::MockDataset::parse`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMockDataOutput {
    /// A JSON array of objects representing the mock data for the query results.
    pub mock_data: String,
}

/// Input for the query-test flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestGeneratedSqlQueryInput {
    /// The URI of the database to test against. Never validated.
    pub db_uri: String,
    /// The SQL query to test.
    pub query: String,
}

/// Output of the query-test flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestGeneratedSqlQueryOutput {
    /// The result of the query execution.
    pub result: String,
}

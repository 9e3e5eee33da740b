//! # Capabilities
//!
//! A capability (or "tool") is a named operation a model may invoke during
//! generation: a name, a description, and a JSON-in/JSON-out `invoke`. The
//! only capability this crate ships is `executeSqlQuery`, whose provided
//! implementation is an explicit placeholder: it never connects to a
//! database and always answers with a fixed templated string. A real
//! database-backed executor can be registered on the client in its place.

use crate::errors::FlowError;
use crate::types::{TestGeneratedSqlQueryInput, TestGeneratedSqlQueryOutput};
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

/// A callable capability with JSON input and output contracts.
#[async_trait]
pub trait Tool: Send + Sync + Debug + DynClone {
    /// The capability's registered name.
    fn name(&self) -> &str;

    /// A one-line description of what the capability does.
    fn description(&self) -> &str;

    /// Invokes the capability with a JSON value matching its input contract.
    async fn invoke(&self, input: Value) -> Result<Value, FlowError>;
}

dyn_clone::clone_trait_object!(Tool);

/// The placeholder `executeSqlQuery` capability.
///
/// Non-functional by design: no connection, authentication, or execution
/// occurs. It reports a canned success string populated with the inputs so
/// the surrounding flow keeps its shape until a real executor is swapped in.
#[derive(Clone, Debug, Default)]
pub struct PlaceholderSqlExecutor;

#[async_trait]
impl Tool for PlaceholderSqlExecutor {
    fn name(&self) -> &str {
        "executeSqlQuery"
    }

    fn description(&self) -> &str {
        "Executes an SQL query against a database and returns the result."
    }

    async fn invoke(&self, input: Value) -> Result<Value, FlowError> {
        let input: TestGeneratedSqlQueryInput =
            serde_json::from_value(input).map_err(|e| FlowError::Tool {
                tool: "executeSqlQuery".to_string(),
                message: format!("input did not match the capability's contract: {e}"),
            })?;

        let result = format!(
            "Successfully connected to {} and executed {}. However, this is just a placeholder, so no actual query was executed.",
            input.db_uri, input.query
        );

        Ok(serde_json::to_value(TestGeneratedSqlQueryOutput {
            result,
        })?)
    }
}

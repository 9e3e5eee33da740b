//! # Generation Session Tests
//!
//! Validates the orchestration sequence behind the "Generate" action: the
//! entry guard, the terminal outcomes, re-entry after failure, and the
//! fencing of overlapping runs.

use async_trait::async_trait;
use sqlgenius::providers::ai::AiProvider;
use sqlgenius::session::{DATA_FORMAT_MESSAGE, GENERATION_FAILURE_MESSAGE};
use sqlgenius::{
    FlowError, GenerationOutcome, GenerationSession, GenerationState, GeniusClientBuilder,
};
use sqlgenius_test_utils::MockAiProvider;
use std::sync::Arc;
use std::time::Duration;

const SCHEMA: &str =
    "CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(255), email VARCHAR(255));";
const QUESTION: &str = "Show me all users with a gmail address";

const SQL_RESPONSE: &str = r#"{"sqlQuery": "SELECT * FROM users WHERE email LIKE '%gmail%';"}"#;
const ROWS_RESPONSE: &str = r#"{"mockData": "[{\"id\": 1, \"name\": \"Ada\", \"email\": \"ada@gmail.com\"}, {\"id\": 2, \"name\": \"Brian\", \"email\": \"brian@gmail.com\"}, {\"id\": 3, \"name\": \"Chidi\", \"email\": \"chidi@gmail.com\"}]"}"#;

fn session_with(provider: &MockAiProvider) -> GenerationSession {
    let client = GeniusClientBuilder::new()
        .ai_provider(Box::new(provider.clone()))
        .build()
        .expect("Failed to build client");
    GenerationSession::new(Arc::new(client))
}

#[tokio::test]
async fn test_successful_run_yields_query_and_dataset() {
    let provider = MockAiProvider::new();
    provider.add_response("expert SQL query generator", SQL_RESPONSE);
    provider.add_response("expert data generator", ROWS_RESPONSE);
    let session = session_with(&provider);

    let outcome = session
        .generate(SCHEMA, QUESTION)
        .await
        .expect("generate failed");

    match &outcome {
        GenerationOutcome::Success { sql_query, dataset } => {
            assert!(sql_query.contains("SELECT"));
            assert_eq!(dataset.len(), 3);
            assert!(dataset.has_consistent_columns());
            for expected in ["id", "name", "email"] {
                assert!(dataset.columns().iter().any(|c| c == expected));
            }
        }
        other => panic!("Expected success, got {other:?}"),
    }

    // The two model calls ran in sequence: SQL first, then mock data
    // prompted with the newly generated query.
    let calls = provider.get_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].0.contains("expert SQL query generator"));
    assert!(calls[1].0.contains("expert data generator"));
    assert!(calls[1].1.contains("SELECT * FROM users WHERE email LIKE"));

    assert_eq!(session.state().await, GenerationState::Finished(outcome));
    assert!(!session.is_generating());
}

#[tokio::test]
async fn test_sql_flow_failure_is_terminal_sql_error() {
    let provider = MockAiProvider::new();
    // Nothing programmed for the SQL persona: the first call fails.
    let session = session_with(&provider);

    let outcome = session
        .generate(SCHEMA, QUESTION)
        .await
        .expect("generate itself must not error on a flow failure");

    assert_eq!(
        outcome,
        GenerationOutcome::SqlError {
            message: GENERATION_FAILURE_MESSAGE.to_string(),
        }
    );
    // The mock data flow never ran.
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_undecodable_mock_data_retains_sql() {
    let provider = MockAiProvider::new();
    provider.add_response("expert SQL query generator", SQL_RESPONSE);
    provider.add_response(
        "expert data generator",
        r#"{"mockData": "oops, not json"}"#,
    );
    let session = session_with(&provider);

    let outcome = session
        .generate(SCHEMA, QUESTION)
        .await
        .expect("generate failed");

    match outcome {
        GenerationOutcome::DataFormatError { sql_query, message } => {
            assert!(sql_query.contains("SELECT"));
            assert_eq!(message, DATA_FORMAT_MESSAGE);
        }
        other => panic!("Expected a data format error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_entry_guard_preserves_prior_state() {
    let provider = MockAiProvider::new();
    provider.add_response("expert SQL query generator", SQL_RESPONSE);
    provider.add_response("expert data generator", ROWS_RESPONSE);
    let session = session_with(&provider);

    session
        .generate(SCHEMA, QUESTION)
        .await
        .expect("first run failed");
    let state_before = session.state().await;
    let calls_before = provider.call_count();

    let err = session
        .generate(SCHEMA, "")
        .await
        .expect_err("an empty question must be rejected");
    assert!(matches!(err, FlowError::EmptyInput { .. }));

    let err = session
        .generate("  ", QUESTION)
        .await
        .expect_err("an empty schema must be rejected");
    assert!(matches!(err, FlowError::EmptyInput { .. }));

    // No flow was invoked and the prior results are untouched.
    assert_eq!(provider.call_count(), calls_before);
    assert_eq!(session.state().await, state_before);
}

#[tokio::test]
async fn test_terminal_states_are_reenterable() {
    let provider = MockAiProvider::new();
    let session = session_with(&provider);

    // First run fails: nothing is programmed.
    let outcome = session.generate(SCHEMA, QUESTION).await.unwrap();
    assert!(matches!(outcome, GenerationOutcome::SqlError { .. }));

    // Program the provider and re-invoke: the session restarts cleanly.
    provider.add_response("expert SQL query generator", SQL_RESPONSE);
    provider.add_response("expert data generator", ROWS_RESPONSE);
    let outcome = session.generate(SCHEMA, QUESTION).await.unwrap();
    assert!(matches!(outcome, GenerationOutcome::Success { .. }));
}

/// A provider that parks each call until a permit is released, to hold a
/// run in flight.
#[derive(Clone, Debug)]
struct StalledProvider {
    release: Arc<tokio::sync::Semaphore>,
}

#[async_trait]
impl AiProvider for StalledProvider {
    async fn generate(&self, _system: &str, _user: &str) -> Result<String, FlowError> {
        self.release
            .acquire()
            .await
            .expect("semaphore closed")
            .forget();
        Ok(r#"{"sqlQuery": "SELECT 1;", "mockData": "[]"}"#.to_string())
    }
}

#[tokio::test]
async fn test_overlapping_generate_is_fenced() {
    let release = Arc::new(tokio::sync::Semaphore::new(0));
    let client = GeniusClientBuilder::new()
        .ai_provider(Box::new(StalledProvider {
            release: release.clone(),
        }))
        .build()
        .expect("Failed to build client");
    let session = Arc::new(GenerationSession::new(Arc::new(client)));

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.generate(SCHEMA, QUESTION).await }
    });

    // Wait until the first run is actually in flight.
    while !session.is_generating() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let err = session
        .generate(SCHEMA, QUESTION)
        .await
        .expect_err("a second run while one is in flight must be rejected");
    assert!(matches!(err, FlowError::GenerationInFlight));

    // Release both model calls and let the first run finish.
    release.add_permits(2);
    let outcome = first.await.expect("task panicked").expect("run failed");
    assert!(matches!(outcome, GenerationOutcome::Success { .. }));
    assert!(!session.is_generating());
}

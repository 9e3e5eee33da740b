//! # Shared Test Utilities
//!
//! Test doubles used across the workspace's test suites.

use async_trait::async_trait;
use sqlgenius::errors::FlowError;
use sqlgenius::providers::ai::AiProvider;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

/// A programmable `AiProvider` for tests.
///
/// Responses are keyed by a unique substring of the system prompt, which is
/// enough to tell the flows apart (each flow carries a distinct persona).
/// Every call is recorded for assertion.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a response for any system prompt containing `key`.
    pub fn add_response(&self, key: &str, response: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded `(system_prompt, user_prompt)` calls.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, FlowError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(FlowError::AiApi(format!(
            "MockAiProvider: no response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }
}

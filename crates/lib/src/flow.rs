//! # Flow Definitions
//!
//! A flow is a named, schema-validated request/response operation backed by
//! a language-model completion: a fixed prompt template with a typed output
//! contract. `PromptDefinition::execute` renders the template, calls the
//! provider, strips any markdown code fences from the raw response, and
//! decodes the result into the flow's declared output record. A response
//! that cannot be decoded is an output-contract violation, never a partial
//! result.

use crate::errors::FlowError;
use crate::prompts::{self, render_template};
use crate::providers::ai::AiProvider;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

/// A named prompt template with a typed output contract.
pub struct PromptDefinition {
    /// The flow's registered name, used in error reporting.
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub user_prompt: &'static str,
}

/// The SQL generation flow definition.
pub const SQL_GENERATION_FLOW: PromptDefinition = PromptDefinition {
    name: "generateSqlQueryFlow",
    system_prompt: prompts::SQL_GENERATION_SYSTEM_PROMPT,
    user_prompt: prompts::SQL_GENERATION_USER_PROMPT,
};

/// The mock data generation flow definition.
pub const MOCK_DATA_FLOW: PromptDefinition = PromptDefinition {
    name: "generateMockDataFlow",
    system_prompt: prompts::MOCK_DATA_SYSTEM_PROMPT,
    user_prompt: prompts::MOCK_DATA_USER_PROMPT,
};

impl PromptDefinition {
    /// Executes the flow against the given provider.
    ///
    /// Every input variable is required non-empty; an empty value rejects
    /// the call before any provider traffic. The decoded output type `O` is
    /// the flow's output contract.
    pub async fn execute<O: DeserializeOwned>(
        &self,
        provider: &dyn AiProvider,
        vars: &[(&'static str, &str)],
    ) -> Result<O, FlowError> {
        for &(field, value) in vars {
            if value.trim().is_empty() {
                return Err(FlowError::EmptyInput {
                    flow: self.name,
                    field,
                });
            }
        }

        let user_prompt = render_template(self.user_prompt, vars);
        debug!(flow = self.name, user_prompt = %user_prompt, "--> Sending prompts to AI provider");

        let raw_response = provider.generate(self.system_prompt, &user_prompt).await?;
        debug!(flow = self.name, "<-- Raw response from AI: {}", &raw_response);

        let payload = extract_json_payload(&raw_response)?;
        serde_json::from_str(&payload).map_err(|e| FlowError::OutputContract {
            flow: self.name.to_string(),
            message: e.to_string(),
        })
    }
}

/// Strips a markdown code fence from a raw model response, if present.
///
/// Providers in JSON mode usually return the bare object, but some models
/// still wrap it in ``` or ```json fences.
fn extract_json_payload(raw: &str) -> Result<String, FlowError> {
    let re = Regex::new(r"```(?:json)?\n?([\s\S]*?)```")?;
    let payload = re
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| raw.trim().to_string());
    Ok(payload)
}

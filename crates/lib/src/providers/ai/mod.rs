pub mod gemini;
pub mod local;

use crate::errors::FlowError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an AI provider.
///
/// This defines the common interface the flows use to obtain completions
/// from different large language models (e.g., Gemini, local OpenAI-
/// compatible servers). Providers are expected to answer with the raw model
/// text; decoding it against a flow's output contract happens upstream.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, FlowError>;
}

dyn_clone::clone_trait_object!(AiProvider);

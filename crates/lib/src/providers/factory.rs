//! # AI Provider Factory
//!
//! Centralizes the logic for turning a `ProviderConfig` into a provider
//! instance, so every consumer (server, tests) builds providers the same
//! way.

use crate::{
    errors::FlowError,
    providers::ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
    types::ProviderConfig,
};
use tracing::{info, warn};

/// Creates an AI provider instance from its configuration.
///
/// For Gemini the API URL can be derived from the model name when not set
/// explicitly; for local/OpenAI-compatible providers a missing URL falls
/// back to the conventional localhost endpoint with a warning.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, FlowError> {
    match config.provider.as_str() {
        "gemini" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                FlowError::MissingAiProvider(
                    "api_key is required for the gemini provider".to_string(),
                )
            })?;
            let api_url = match (&config.api_url, &config.model_name) {
                (Some(url), _) => url.clone(),
                (None, Some(model)) => format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
                ),
                (None, None) => {
                    return Err(FlowError::MissingAiProvider(
                        "the gemini provider needs either api_url or model_name".to_string(),
                    ))
                }
            };
            info!("Configuring Gemini provider with URL: {api_url}");
            Ok(Box::new(GeminiProvider::new(api_url, api_key)?))
        }
        "local" => {
            let api_url = config.api_url.clone().unwrap_or_else(|| {
                let fallback_url = "http://localhost:1234/v1/chat/completions".to_string();
                warn!("api_url is not set for the local provider. Falling back to {fallback_url}");
                fallback_url
            });
            info!("Configuring local AI provider with URL: {api_url}");
            Ok(Box::new(LocalAiProvider::new(
                api_url,
                config.api_key.clone(),
                config.model_name.clone(),
            )?))
        }
        other => Err(FlowError::MissingAiProvider(format!(
            "unsupported AI provider type: {other}"
        ))),
    }
}

//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it
//! at startup: one AI provider from the configuration, one flow client
//! shared across all request handlers.

use crate::config::AppConfig;
use sqlgenius::{providers::factory::create_provider, GeniusClient, GeniusClientBuilder};
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The flow client backing every endpoint.
    pub client: Arc<GeniusClient>,
}

/// Builds the shared application state from the configuration.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider = create_provider(&config.provider)?;

    let client = GeniusClientBuilder::new().ai_provider(ai_provider).build()?;

    Ok(AppState {
        config: Arc::new(config),
        client: Arc::new(client),
    })
}

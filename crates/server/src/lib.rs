//! # sqlgenius-server
//!
//! An Axum HTTP surface over the `sqlgenius` flow layer: one endpoint per
//! flow, plus the orchestrated `/generate` sequence a UI drives. The server
//! holds no per-user state; each browser session owns its own inputs and
//! history.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

use crate::config::AppConfig;
use crate::router::create_router;
use crate::state::build_app_state;
use tracing::{debug, info};

/// The main entry point for running the server.
pub async fn run(listener: tokio::net::TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    let app_state = build_app_state(config)?;
    let app = create_router(app_state);

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

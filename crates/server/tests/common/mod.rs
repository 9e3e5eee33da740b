//! # Common Test Utilities
//!
//! A full application harness for the server's integration tests: spawns
//! the real router on a random port, with the AI provider pointed at an
//! `httpmock::MockServer` standing in for an OpenAI-compatible endpoint.

#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use reqwest::Client;
use sqlgenius::providers::ai::local::LocalAiProvider;
use sqlgenius::types::ProviderConfig;
use sqlgenius::GeniusClientBuilder;
use sqlgenius_server::config::AppConfig;
use sqlgenius_server::router::create_router;
use sqlgenius_server::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the application server and returns a harness around it.
    pub async fn spawn() -> Result<Self> {
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();

        let ai_provider = Box::new(LocalAiProvider::new(
            mock_server.url("/v1/chat/completions"),
            None,
            None,
        )?);

        let genius_client = GeniusClientBuilder::new().ai_provider(ai_provider).build()?;

        let config = AppConfig {
            port: 0,
            provider: ProviderConfig {
                provider: "local".to_string(),
                api_url: Some(mock_server.url("/v1/chat/completions")),
                api_key: None,
                model_name: None,
            },
        };

        let app_state = AppState {
            config: Arc::new(config),
            client: Arc::new(genius_client),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Server error: {e}");
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _server_handle: server_handle,
        })
    }
}

//! Server initialization and main run loop

use crate::api::{self, AppState};
use crate::server::ServerConfig;
use anyhow::{Context, Result};
use patron_core::{AssistantGateway, SessionStore};
use patron_llm::{GeminiConfig, GeminiProvider, LlmProvider};
use patron_tools::{HttpMcpBackend, ToolExecutor};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting Patron v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();
    info!(
        backend_url = %config.backend_url,
        gemini_enabled = config.gemini_enabled(),
        "Configuration loaded"
    );

    let backend = Arc::new(
        HttpMcpBackend::new(config.backend_url.clone())
            .context("Failed to create backend client")?,
    );
    let executor = ToolExecutor::new(backend);

    let gateway = match &config.gemini_api_key {
        Some(key) => {
            let provider: Arc<dyn LlmProvider> = Arc::new(
                GeminiProvider::new(GeminiConfig::new(key.clone()))
                    .context("Failed to create Gemini provider")?,
            );
            info!("Assistant initialized with provider: {}", provider.name());
            Some(Arc::new(AssistantGateway::new(
                provider,
                executor.clone(),
                Arc::new(SessionStore::new()),
            )))
        }
        None => {
            warn!("GEMINI_API_KEY not found. Chat will use fallback responses.");
            None
        }
    };

    let state = AppState {
        gateway,
        executor,
        backend_url: config.backend_url.clone(),
    };

    let app = api::routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listen address")?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

//! HTTP API surface consumed by the customer widget
//!
//! Routes:
//! - `POST /api/mcp-chat` — chat with context passthrough
//! - `POST /api/chat` — legacy chat, no context
//! - `POST /api/mcp/tool` — direct tool execution
//! - `GET /api/config` — integration flags for the widget
//! - `GET /health` — liveness probe

use axum::routing::{get, post};
use axum::Router;
use patron_core::AssistantGateway;
use patron_tools::ToolExecutor;
use std::sync::Arc;

mod chat;
mod config;
mod health;
mod tool;

#[cfg(test)]
mod tests;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// The conversational gateway; `None` when no model credential is
    /// configured, in which case chat answers come from the fallback
    /// responder
    pub gateway: Option<Arc<AssistantGateway>>,
    /// Direct tool execution against the backend
    pub executor: ToolExecutor,
    /// Backend base URL, reported to the widget via `/api/config`
    pub backend_url: String,
}

/// Build the API router
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/mcp-chat", post(chat::mcp_chat))
        .route("/api/mcp/tool", post(tool::execute_tool))
        .route("/api/config", get(config::get_config))
        .route("/health", get(health::health_check))
        .with_state(state)
}

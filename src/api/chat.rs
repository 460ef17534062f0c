//! Chat endpoints
//!
//! Both endpoints validate the message, then either run the gateway or
//! answer from the fallback responder when no model is configured. A failed
//! gateway turn still returns HTTP 200 with `success: false` so the widget
//! renders the apology inline; only a missing message is a 400.

use crate::api::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use patron_core::{fallback_response, ChatContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_SESSION: &str = "default";

/// Request body for both chat endpoints
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The customer's message
    #[serde(default)]
    pub message: Option<String>,
    /// Client-chosen session identifier
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
    /// Context bundle carried across turns (mcp-chat only)
    #[serde(default)]
    pub context: Option<ChatContext>,
}

/// Reply for `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply for `POST /api/mcp-chat`
#[derive(Debug, Serialize)]
pub struct McpChatResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub context: ChatContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn validate_message(request: &ChatRequest) -> Result<&str, ()> {
    match request.message.as_deref() {
        Some(message) if !message.trim().is_empty() => Ok(message),
        _ => Err(()),
    }
}

/// `POST /api/chat` — legacy chat without context passthrough
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ChatResponse>)> {
    let session_id = request
        .session_id
        .clone()
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());

    let Ok(message) = validate_message(&request) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ChatResponse {
                success: false,
                response: None,
                session_id,
                error: Some("Message is required".to_string()),
            }),
        ));
    };

    let Some(gateway) = &state.gateway else {
        debug!("no model configured, answering from fallback responder");
        return Ok(Json(ChatResponse {
            success: true,
            response: Some(fallback_response(message)),
            session_id,
            error: None,
        }));
    };

    let reply = gateway.process_message(message, &session_id).await;
    Ok(Json(ChatResponse {
        success: reply.success,
        response: reply.response,
        session_id: reply.session_id,
        error: reply.error,
    }))
}

/// `POST /api/mcp-chat` — chat with context passthrough
pub async fn mcp_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<McpChatResponse>, (StatusCode, Json<ChatResponse>)> {
    let session_id = request
        .session_id
        .clone()
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());
    let context = request.context.clone().unwrap_or_default();

    let Ok(message) = validate_message(&request) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ChatResponse {
                success: false,
                response: None,
                session_id,
                error: Some("Message is required".to_string()),
            }),
        ));
    };

    let Some(gateway) = &state.gateway else {
        debug!("no model configured, answering from fallback responder");
        return Ok(Json(McpChatResponse {
            success: true,
            response: Some(fallback_response(message)),
            session_id,
            context,
            error: None,
        }));
    };

    let reply = gateway
        .process_with_context(message, &session_id, context)
        .await;
    Ok(Json(McpChatResponse {
        success: reply.success,
        response: reply.response,
        session_id: reply.session_id,
        context: reply.context,
        error: reply.error,
    }))
}

//! Configuration endpoint for the widget

use crate::api::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

/// Integration flags the widget needs before rendering the chat UI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Whether the Gemini-backed assistant is available
    pub gemini_enabled: bool,
    /// Backend base URL for direct lookups
    pub backend_url: String,
}

/// `GET /api/config`
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        gemini_enabled: state.gateway.is_some(),
        backend_url: state.backend_url.clone(),
    })
}

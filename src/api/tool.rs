//! Direct tool execution endpoint
//!
//! Lets the widget (or an operator) invoke a backend tool without a model
//! turn. The executor absorbs tool-level failures, so the endpoint only
//! rejects structurally invalid requests.

use crate::api::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /api/mcp/tool`
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    /// Tool wire name
    #[serde(default)]
    pub tool: Option<String>,
    /// Tool arguments
    #[serde(default)]
    pub parameters: Option<Value>,
    /// Caller context, echoed back
    #[serde(default)]
    pub context: Option<Value>,
}

/// Reply for `POST /api/mcp/tool`
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub context: Value,
}

/// `POST /api/mcp/tool`
pub async fn execute_tool(
    State(state): State<AppState>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<ToolResponse>, (StatusCode, Json<ToolResponse>)> {
    let context = request.context.unwrap_or_else(|| Value::Object(Default::default()));

    let (Some(tool), Some(parameters)) = (request.tool, request.parameters) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ToolResponse {
                success: false,
                data: None,
                error: Some("Tool and parameters are required".to_string()),
                context,
            }),
        ));
    };

    let result = state.executor.execute(&tool, &parameters).await;
    let success = result.is_success();
    let error = result.error_text().map(ToString::to_string);
    let body = result.into_value();
    // Backends that wrap their payload in `data` are unwrapped; everything
    // else is passed through whole.
    let data = body.get("data").cloned().or(Some(body));

    Ok(Json(ToolResponse {
        success,
        data,
        error,
        context,
    }))
}

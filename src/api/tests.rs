//! Router-level tests for the widget-facing API

use crate::api::{routes, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use patron_core::{AssistantGateway, SessionStore};
use patron_llm::{LlmProvider, ToolCompletionRequest, ToolCompletionResponse};
use patron_tools::{BackendError, McpBackend, ToolExecutor};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Answers every model turn with the same text
struct EchoProvider {
    text: String,
}

#[async_trait]
impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete_with_tools(
        &self,
        _: ToolCompletionRequest,
    ) -> patron_llm::Result<ToolCompletionResponse> {
        Ok(ToolCompletionResponse {
            content: Some(self.text.clone()),
            tool_calls: vec![],
            usage: None,
            finish_reason: None,
            model: "echo-model".to_string(),
        })
    }
}

/// Replays one fixed backend reply
struct FixedBackend {
    reply: std::result::Result<Value, ()>,
}

#[async_trait]
impl McpBackend for FixedBackend {
    async fn call_tool(&self, _: &str, _: &Value) -> std::result::Result<Value, BackendError> {
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err(()) => Err(BackendError::NotFound),
        }
    }
}

fn state_without_model() -> AppState {
    AppState {
        gateway: None,
        executor: ToolExecutor::new(Arc::new(FixedBackend {
            reply: Ok(json!({"success": true})),
        })),
        backend_url: "http://localhost:8000".to_string(),
    }
}

fn state_with_model(answer: &str, backend_reply: Value) -> AppState {
    let provider: Arc<dyn LlmProvider> = Arc::new(EchoProvider {
        text: answer.to_string(),
    });
    let executor = ToolExecutor::new(Arc::new(FixedBackend {
        reply: Ok(backend_reply),
    }));
    AppState {
        gateway: Some(Arc::new(AssistantGateway::new(
            provider,
            executor.clone(),
            Arc::new(SessionStore::new()),
        ))),
        executor,
        backend_url: "http://localhost:8000".to_string(),
    }
}

async fn send(state: AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = routes(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(state_without_model(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_config_reports_model_availability() {
    let (status, body) = send(state_without_model(), Method::GET, "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["geminiEnabled"], json!(false));
    assert_eq!(body["backendUrl"], "http://localhost:8000");

    let (_, body) = send(
        state_with_model("hi", json!({})),
        Method::GET,
        "/api/config",
        None,
    )
    .await;
    assert_eq!(body["geminiEnabled"], json!(true));
}

#[tokio::test]
async fn test_chat_requires_message() {
    let (status, body) = send(
        state_without_model(),
        Method::POST,
        "/api/chat",
        Some(json!({ "sessionId": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn test_chat_fallback_points_answer_mentions_phone_number() {
    let (status, body) = send(
        state_without_model(),
        Method::POST,
        "/api/chat",
        Some(json!({ "message": "How many points do I have?", "sessionId": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["response"].as_str().unwrap().contains("phone number"));
}

#[tokio::test]
async fn test_mcp_chat_fallback_preserves_context() {
    let (status, body) = send(
        state_without_model(),
        Method::POST,
        "/api/mcp-chat",
        Some(json!({
            "message": "help",
            "sessionId": "s1",
            "context": { "phone_number": "+263775123456" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["context"]["phone_number"], "+263775123456");
}

#[tokio::test]
async fn test_mcp_chat_context_round_trip() {
    let (status, body) = send(
        state_with_model("Hello there!", json!({})),
        Method::POST,
        "/api/mcp-chat",
        Some(json!({
            "message": "no digits in this message",
            "sessionId": "s1",
            "context": { "phone_number": "+111" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["response"], "Hello there!");
    assert_eq!(body["context"]["phone_number"], "+111");
    assert_eq!(body["sessionId"], "s1");
}

#[tokio::test]
async fn test_tool_endpoint_requires_tool_and_parameters() {
    let (status, body) = send(
        state_without_model(),
        Method::POST,
        "/api/mcp/tool",
        Some(json!({ "tool": "check_points" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Tool and parameters are required");
}

#[tokio::test]
async fn test_tool_endpoint_reports_unknown_tool() {
    let (status, body) = send(
        state_without_model(),
        Method::POST,
        "/api/mcp/tool",
        Some(json!({ "tool": "mystery_tool", "parameters": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], "Unknown tool: mystery_tool");
}

#[tokio::test]
async fn test_tool_endpoint_unwraps_data() {
    let state = AppState {
        executor: ToolExecutor::new(Arc::new(FixedBackend {
            reply: Ok(json!({"success": true, "data": {"total_points": 420}})),
        })),
        ..state_without_model()
    };
    let (status, body) = send(
        state,
        Method::POST,
        "/api/mcp/tool",
        Some(json!({
            "tool": "check_points",
            "parameters": { "phone_number": "+263775123456" },
            "context": { "origin": "widget" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["total_points"], 420);
    assert_eq!(body["context"]["origin"], "widget");
}

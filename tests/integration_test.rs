//! Integration tests for Patron
//!
//! These tests verify the integration between crates:
//! - patron-llm: provider trait and message shapes
//! - patron-tools: tool dispatch and error normalization
//! - patron-core: gateway turns, session state, entity extraction

use async_trait::async_trait;
use patron_core::{AssistantGateway, SessionStore, MAX_TRANSCRIPT_ENTRIES};
use patron_llm::{
    LlmProvider, MessageRole, ToolCall, ToolCompletionRequest, ToolCompletionResponse,
};
use patron_tools::{BackendError, McpBackend, ToolExecutor, ToolKind};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// Test doubles
// ============================================================================

/// Replays scripted turns and records every request it was given
struct RecordingProvider {
    turns: Mutex<VecDeque<ToolCompletionResponse>>,
    requests: Mutex<Vec<ToolCompletionRequest>>,
}

impl RecordingProvider {
    fn new(turns: Vec<ToolCompletionResponse>) -> Arc<Self> {
        Arc::new(Self {
            turns: Mutex::new(turns.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ToolCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> patron_llm::Result<ToolCompletionResponse> {
        self.requests.lock().unwrap().push(request);
        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| patron_llm::Error::Api("script exhausted".to_string()))
    }
}

/// Backend that always answers 404 (unknown customer)
struct NotFoundBackend;

#[async_trait]
impl McpBackend for NotFoundBackend {
    async fn call_tool(&self, _: &str, _: &Value) -> Result<Value, BackendError> {
        Err(BackendError::NotFound)
    }
}

fn text_turn(text: &str) -> ToolCompletionResponse {
    ToolCompletionResponse {
        content: Some(text.to_string()),
        tool_calls: vec![],
        usage: None,
        finish_reason: Some("STOP".to_string()),
        model: "recording-model".to_string(),
    }
}

fn tool_turn(name: &str, arguments: &str) -> ToolCompletionResponse {
    ToolCompletionResponse {
        content: None,
        tool_calls: vec![ToolCall {
            id: "call_1".to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }],
        usage: None,
        finish_reason: Some("STOP".to_string()),
        model: "recording-model".to_string(),
    }
}

// ============================================================================
// Gateway + executor integration
// ============================================================================

#[tokio::test]
async fn test_unknown_customer_gets_onboarding_hint_not_a_stack_trace() {
    let provider = RecordingProvider::new(vec![
        tool_turn("check_points", r#"{"phone_number":"+263775123456"}"#),
        text_turn("It looks like you don't have an account yet."),
    ]);
    let gateway = AssistantGateway::new(
        provider.clone(),
        ToolExecutor::new(Arc::new(NotFoundBackend)),
        Arc::new(SessionStore::new()),
    );

    let reply = gateway
        .process_message("check points for +263775123456", "s1")
        .await;
    assert!(reply.success);

    // The second model turn carries the executor's onboarding message as the
    // tool response, with no transport detail leaking through.
    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    let tool_response = requests[1]
        .request
        .messages
        .iter()
        .find(|m| m.role == MessageRole::Tool)
        .expect("second turn includes a tool response");
    assert!(tool_response.content.contains("account"));
    assert!(tool_response.content.contains("purchase"));
    assert!(!tool_response.content.contains("404"));
}

#[tokio::test]
async fn test_every_turn_attaches_the_full_tool_set() {
    let provider = RecordingProvider::new(vec![text_turn("hello!")]);
    let gateway = AssistantGateway::new(
        provider.clone(),
        ToolExecutor::new(Arc::new(NotFoundBackend)),
        Arc::new(SessionStore::new()),
    );

    gateway.process_message("hi", "s1").await;

    let requests = provider.requests();
    assert_eq!(requests[0].tools.len(), ToolKind::ALL.len());
    let names: Vec<&str> = requests[0].tools.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&"check_points"));
    assert!(names.contains(&"get_analytics"));
}

#[tokio::test]
async fn test_transcript_stays_bounded_across_many_turns() {
    let turns: Vec<ToolCompletionResponse> =
        (0..30).map(|i| text_turn(&format!("answer {i}"))).collect();
    let provider = RecordingProvider::new(turns);
    let sessions = Arc::new(SessionStore::new());
    let gateway = AssistantGateway::new(
        provider,
        ToolExecutor::new(Arc::new(NotFoundBackend)),
        sessions.clone(),
    );

    for i in 0..30 {
        let reply = gateway.process_message(&format!("question {i}"), "s1").await;
        assert!(reply.success);
    }

    let transcript = sessions.transcript("s1").await;
    assert_eq!(transcript.len(), MAX_TRANSCRIPT_ENTRIES);
    assert_eq!(transcript.last().unwrap().text, "answer 29");
}

#[tokio::test]
async fn test_phone_extracted_in_one_turn_is_available_in_the_next() {
    let provider = RecordingProvider::new(vec![
        text_turn("Noted your number!"),
        text_turn("Here are your points."),
    ]);
    let sessions = Arc::new(SessionStore::new());
    let gateway = AssistantGateway::new(
        provider,
        ToolExecutor::new(Arc::new(NotFoundBackend)),
        sessions.clone(),
    );

    gateway
        .process_message("my number is +263775123456", "s1")
        .await;
    let reply = gateway
        .process_with_context("how many points do I have?", "s1", Default::default())
        .await;

    assert_eq!(
        reply.context.get("phone_number").and_then(Value::as_str),
        Some("+263775123456")
    );
}

// ============================================================================
// Executor behavior observable across crates
// ============================================================================

#[tokio::test]
async fn test_executor_result_json_is_model_consumable() {
    let executor = ToolExecutor::new(Arc::new(NotFoundBackend));
    let result = executor
        .execute("check_points", &json!({"phone_number": "+263775123456"}))
        .await;

    // The envelope deserializes cleanly as an object the model can read
    let value = result.into_value();
    assert_eq!(value["success"], json!(false));
    assert!(value["error"].is_string());
}

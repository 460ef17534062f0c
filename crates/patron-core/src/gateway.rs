//! Gateway - conversational tool-dispatch loop
//!
//! One inbound message runs: entity extraction, a model turn with tool
//! declarations attached, optional tool dispatch plus a second model turn
//! over the tool result, then transcript update. Only the first tool call
//! of a turn is honored; additional calls are dropped.
//!
//! Failure semantics: anything that goes wrong after validation is absorbed
//! into an apology reply. The widget renders it inline, so the caller never
//! sees a protocol-level error for a failed turn.

use crate::entities::extract_phone_number;
use crate::error::{Error, Result};
use crate::session::SessionStore;
use patron_llm::{
    CompletionRequest, LlmProvider, Message, MessageRole, ToolCompletionRequest,
};
use patron_tools::{ToolExecutor, ToolKind};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// User-facing reply for any failed turn
pub const APOLOGY: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// Fixed persona and tool-usage policy sent as the system instruction.
const SYSTEM_PROMPT: &str = "\
You are a helpful and friendly loyalty program assistant for a multi-business loyalty platform. \
Your name is Loyalty AI Assistant and you help customers with their loyalty rewards.

IMPORTANT: You have access to real-time tools that can check customer data. Always use these \
tools when customers ask about their points, transactions, or need recommendations.

Your primary functions are:
1. Points Balance: Use the check_points tool to get real customer points data
2. Transaction History: Use the get_customer_transactions tool to show recent transactions
3. Recommendations: Use the get_recommendations tool to provide personalized suggestions
4. Referral Information: Use the explain_referrals tool to explain how referrals work
5. Business Info: Use the get_business_info tool for business information

How to use tools:
- When a customer asks about points, ALWAYS use the check_points tool with their phone number
- When they ask for recommendations, use the get_recommendations tool
- When they ask about referrals, use the explain_referrals tool
- Extract phone numbers from messages automatically (look for patterns like +1234567890, 1234567890, etc.)

Guidelines:
- Always use the appropriate tool when customer data is requested
- Be enthusiastic and helpful about the loyalty program
- Use emojis to make conversations engaging
- If you need a phone number, ask for it politely
- Always provide specific data from the tools, not generic responses
- If a tool fails, apologize and suggest alternatives

Remember: You have real access to customer data through tools - use them!";

/// Context key/value bundle carried between client and gateway
pub type ChatContext = serde_json::Map<String, Value>;

/// Gateway reply for one turn
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Whether the turn produced an answer
    pub success: bool,
    /// The assistant's answer (present on success)
    pub response: Option<String>,
    /// User-facing error (present on failure)
    pub error: Option<String>,
    /// Session the turn belongs to
    pub session_id: String,
    /// Merged context for the client to persist
    pub context: ChatContext,
}

/// Conversational gateway: model turns plus tool dispatch per request
pub struct AssistantGateway {
    provider: Arc<dyn LlmProvider>,
    executor: ToolExecutor,
    sessions: Arc<SessionStore>,
}

impl AssistantGateway {
    /// Create a gateway over a model provider, tool executor, and session store
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        executor: ToolExecutor,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            provider,
            executor,
            sessions,
        }
    }

    /// The session store backing this gateway
    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Process a message without caller-supplied context (legacy chat path)
    pub async fn process_message(&self, message: &str, session_id: &str) -> ChatReply {
        self.process_with_context(message, session_id, ChatContext::new())
            .await
    }

    /// Process a message with caller-supplied context.
    ///
    /// A phone number in the context seeds the session before the turn runs;
    /// a phone number mentioned in the message itself then overwrites it
    /// (most-recent-mention-wins). The returned context is the caller's with
    /// `phone_number` set to the session's current value.
    pub async fn process_with_context(
        &self,
        message: &str,
        session_id: &str,
        context: ChatContext,
    ) -> ChatReply {
        if let Some(phone) = context.get("phone_number").and_then(Value::as_str) {
            self.sessions.set_phone(session_id, phone).await;
        }

        match self.run_turn(message, session_id).await {
            Ok(answer) => {
                let mut merged = context;
                if let Some(phone) = self.sessions.phone(session_id).await {
                    merged.insert("phone_number".to_string(), Value::String(phone));
                }
                ChatReply {
                    success: true,
                    response: Some(answer),
                    error: None,
                    session_id: session_id.to_string(),
                    context: merged,
                }
            }
            Err(err) => {
                error!(session_id, error = %err, "turn failed, replying with apology");
                ChatReply {
                    success: false,
                    response: None,
                    error: Some(APOLOGY.to_string()),
                    session_id: session_id.to_string(),
                    context,
                }
            }
        }
    }

    /// One full turn: extraction, model turn(s), optional tool dispatch,
    /// transcript update. Returns the final answer text.
    async fn run_turn(&self, message: &str, session_id: &str) -> Result<String> {
        if let Some(phone) = extract_phone_number(message) {
            debug!(session_id, "phone number extracted from message");
            self.sessions.set_phone(session_id, phone).await;
        }

        let mut messages = vec![Message::system(SYSTEM_PROMPT)];
        for entry in self.sessions.transcript(session_id).await {
            messages.push(Message {
                role: entry.role,
                content: entry.text,
                name: None,
                tool_calls: Vec::new(),
            });
        }
        messages.push(Message::user(message));

        let first = self
            .provider
            .complete_with_tools(ToolCompletionRequest::new(
                CompletionRequest::new("")
                    .with_messages(messages.clone())
                    .with_max_tokens(1000)
                    .with_temperature(0.7),
                ToolKind::declarations(),
            ))
            .await?;

        let answer = if let Some(call) = first.tool_calls.first() {
            if first.tool_calls.len() > 1 {
                warn!(
                    session_id,
                    dropped = first.tool_calls.len() - 1,
                    "honoring only the first tool call of the turn"
                );
            }
            info!(session_id, tool = %call.name, "dispatching tool call");

            let arguments: Value =
                serde_json::from_str(&call.arguments).unwrap_or_else(|_| serde_json::json!({}));
            let result = self.executor.execute(&call.name, &arguments).await;

            messages.push(Message::assistant_with_tool_calls(
                first.content.clone().unwrap_or_default(),
                vec![call.clone()],
            ));
            messages.push(Message::tool_response(
                call.name.clone(),
                result.into_value().to_string(),
            ));

            let second = self
                .provider
                .complete_with_tools(ToolCompletionRequest::new(
                    CompletionRequest::new("")
                        .with_messages(messages)
                        .with_max_tokens(1000)
                        .with_temperature(0.7),
                    ToolKind::declarations(),
                ))
                .await?;

            second
                .content
                .filter(|text| !text.is_empty())
                .ok_or(Error::EmptyAnswer)?
        } else {
            first
                .content
                .filter(|text| !text.is_empty())
                .ok_or(Error::EmptyAnswer)?
        };

        self.sessions
            .append(session_id, MessageRole::User, message)
            .await;
        self.sessions
            .append(session_id, MessageRole::Assistant, answer.clone())
            .await;

        Ok(answer)
    }
}

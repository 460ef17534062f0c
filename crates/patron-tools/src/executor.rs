//! Executor - tool dispatch against the loyalty backend
//!
//! Takes a tool call as named by the model, re-validates its arguments,
//! invokes the backend, and normalizes every outcome into a [`ToolResult`].
//! The result text is relayed through the model to a customer, so failures
//! carry recovery hints instead of raw transport errors. A backend 404 is an
//! expected case (customer has no account yet) and gets an onboarding
//! message, not an apology.

use crate::backend::{BackendError, McpBackend};
use crate::kind::ToolKind;
use crate::phone::is_valid_phone;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Onboarding message for a points lookup on an unknown phone number.
const POINTS_NOT_FOUND: &str = "📋 I couldn't find an account with that phone number. This could mean:\n\n\
• You haven't made your first purchase yet\n\
• The phone number might be entered incorrectly\n\
• You might be using a different format\n\n\
💡 To get started, make a purchase at any participating business and mention this phone number!";

/// Onboarding message for recommendations with no purchase history.
const RECOMMENDATIONS_NOT_FOUND: &str = "💡 I don't have enough information to make personalized \
recommendations yet. Make a few purchases at our partner businesses and I'll have great \
suggestions for you!";

/// Normalized tool outcome: the JSON the model (and the direct tool endpoint)
/// sees. Successful backend bodies pass through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolResult(pub Value);

impl ToolResult {
    /// Wrap a backend body as-is
    #[must_use]
    pub fn from_backend(body: Value) -> Self {
        Self(body)
    }

    /// A failure carrying a user-presentable error message
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self(json!({ "success": false, "error": error.into() }))
    }

    /// Whether the result represents success
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self.0.get("success").and_then(Value::as_bool) {
            Some(flag) => flag,
            // Bodies without an explicit flag succeed unless they carry an error
            None => self.0.get("error").is_none(),
        }
    }

    /// The error message, if any
    #[must_use]
    pub fn error_text(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// Consume into the underlying JSON value
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Executes assistant tool calls against the backend
#[derive(Clone)]
pub struct ToolExecutor {
    backend: Arc<dyn McpBackend>,
}

impl ToolExecutor {
    /// Create an executor over the given backend
    #[must_use]
    pub fn new(backend: Arc<dyn McpBackend>) -> Self {
        Self { backend }
    }

    /// Execute a tool call by its wire name.
    ///
    /// Never returns an error: unknown tools, invalid arguments, and backend
    /// failures all surface as a [`ToolResult`] the model can explain to the
    /// user.
    pub async fn execute(&self, name: &str, parameters: &Value) -> ToolResult {
        let Some(kind) = ToolKind::from_name(name) else {
            warn!(tool = name, "model requested unknown tool");
            return ToolResult(json!({ "error": format!("Unknown tool: {name}") }));
        };

        // Phone numbers in tool arguments come from the model, not the user.
        // Re-apply the direct-input validation before touching the backend.
        if let Some(phone) = parameters.get("phone_number").and_then(Value::as_str) {
            if !is_valid_phone(phone) {
                debug!(tool = %kind, "rejecting tool call with malformed phone number");
                return ToolResult::failure(
                    "Please provide a valid phone number in international format (e.g., +1234567890).",
                );
            }
        } else if kind.requires_phone() {
            return ToolResult::failure(
                "A phone number is required for this request. Please share your phone number in international format (e.g., +1234567890).",
            );
        }

        debug!(tool = %kind, "dispatching tool call");
        match self.backend.call_tool(kind.as_str(), parameters).await {
            Ok(body) => ToolResult::from_backend(body),
            Err(err) => Self::degrade(kind, err),
        }
    }

    /// Map a backend failure to the per-tool fallback result
    fn degrade(kind: ToolKind, err: BackendError) -> ToolResult {
        warn!(tool = %kind, error = %err, "backend tool call failed");
        match (kind, err) {
            (ToolKind::CheckPoints, BackendError::NotFound) => {
                ToolResult::failure(POINTS_NOT_FOUND)
            }
            (ToolKind::CheckPoints, err) => {
                ToolResult::failure(format!("Unable to check points: {err}"))
            }
            (ToolKind::GetRecommendations, BackendError::NotFound) => {
                ToolResult::failure(RECOMMENDATIONS_NOT_FOUND)
            }
            (ToolKind::GetRecommendations, _) => {
                ToolResult::failure("Unable to fetch recommendations at this time.")
            }
            // Referral mechanics are static knowledge; answer locally when
            // the backend can't.
            (ToolKind::ExplainReferrals, _) => ToolResult(json!({
                "success": true,
                "data": {
                    "how_it_works": [
                        "When you refer a friend, ask them to mention your phone number during their first purchase",
                        "Once they make their first purchase, you both earn bonus points",
                        "The more friends you refer, the more bonus points you earn",
                        "There's no limit to how many friends you can refer"
                    ],
                    "benefits": [
                        "You earn bonus points for each successful referral",
                        "Your friends get bonus points on their first purchase",
                        "Help local businesses grow their customer base",
                        "Build a community of loyal customers"
                    ]
                }
            })),
            (ToolKind::GetBusinessInfo, _) => ToolResult(json!({
                "success": true,
                "data": {
                    "message": "Visit our participating businesses to earn points on every purchase!",
                    "note": "Contact support for a complete list of participating businesses in your area."
                }
            })),
            (ToolKind::GetCustomerTransactions, _) => {
                ToolResult::failure("Unable to fetch transaction history at this time.")
            }
            (ToolKind::GetAnalytics, _) => {
                ToolResult::failure("Analytics data is not available at this time.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted backend: replays a fixed reply and records calls
    struct ScriptedBackend {
        reply: std::result::Result<Value, fn() -> BackendError>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedBackend {
        fn ok(body: Value) -> Self {
            Self {
                reply: Ok(body),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> BackendError) -> Self {
            Self {
                reply: Err(err),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl McpBackend for ScriptedBackend {
        async fn call_tool(
            &self,
            tool: &str,
            parameters: &Value,
        ) -> std::result::Result<Value, BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push((tool.to_string(), parameters.clone()));
            match &self.reply {
                Ok(body) => Ok(body.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    #[tokio::test]
    async fn test_successful_call_passes_body_through() {
        let body = json!({ "success": true, "data": { "total_points": 420 } });
        let backend = Arc::new(ScriptedBackend::ok(body.clone()));
        let executor = ToolExecutor::new(backend.clone());

        let result = executor
            .execute("check_points", &json!({ "phone_number": "+263775123456" }))
            .await;

        assert!(result.is_success());
        assert_eq!(result.into_value(), body);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_not_executed() {
        let backend = Arc::new(ScriptedBackend::ok(json!({})));
        let executor = ToolExecutor::new(backend.clone());

        let result = executor.execute("wipe_ledger", &json!({})).await;

        assert_eq!(
            result.into_value(),
            json!({ "error": "Unknown tool: wipe_ledger" })
        );
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_not_found_becomes_onboarding_message() {
        let backend = Arc::new(ScriptedBackend::failing(|| BackendError::NotFound));
        let executor = ToolExecutor::new(backend);

        let result = executor
            .execute("check_points", &json!({ "phone_number": "+263775123456" }))
            .await;

        assert!(!result.is_success());
        let error = result.error_text().unwrap();
        assert!(error.contains("purchase"));
        assert!(error.contains("account"));
        assert!(!error.contains("404"));
    }

    #[tokio::test]
    async fn test_malformed_model_phone_is_rejected_before_dispatch() {
        let backend = Arc::new(ScriptedBackend::ok(json!({})));
        let executor = ToolExecutor::new(backend.clone());

        let result = executor
            .execute("check_points", &json!({ "phone_number": "not-a-number" }))
            .await;

        assert!(!result.is_success());
        assert!(result.error_text().unwrap().contains("phone number"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_required_phone_is_rejected() {
        let backend = Arc::new(ScriptedBackend::ok(json!({})));
        let executor = ToolExecutor::new(backend.clone());

        let result = executor.execute("get_customer_transactions", &json!({})).await;

        assert!(!result.is_success());
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_explain_referrals_degrades_to_local_answer() {
        let backend = Arc::new(ScriptedBackend::failing(|| {
            BackendError::Unreachable("connection refused".to_string())
        }));
        let executor = ToolExecutor::new(backend);

        let result = executor.execute("explain_referrals", &json!({})).await;

        assert!(result.is_success());
        let value = result.into_value();
        assert!(value["data"]["how_it_works"].is_array());
    }

    #[tokio::test]
    async fn test_business_info_degrades_to_generic_pointer() {
        let backend = Arc::new(ScriptedBackend::failing(|| BackendError::Status {
            status: 500,
            detail: "internal error".to_string(),
        }));
        let executor = ToolExecutor::new(backend);

        let result = executor.execute("get_business_info", &json!({})).await;

        assert!(result.is_success());
        assert!(result.into_value()["data"]["message"]
            .as_str()
            .unwrap()
            .contains("participating businesses"));
    }
}

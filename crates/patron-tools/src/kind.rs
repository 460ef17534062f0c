//! Kind - the closed set of assistant tools
//!
//! Every tool the model may call is a variant here, so dispatch is checked
//! for exhaustiveness at compile time. A tool name the model invents that is
//! not in this set is reported back as an unknown tool, never executed.

use patron_llm::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Enumerated assistant tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Points balance and recent transactions lookup
    CheckPoints,
    /// Personalized recommendations lookup
    GetRecommendations,
    /// Referral program explanation
    ExplainReferrals,
    /// Participating business information
    GetBusinessInfo,
    /// Transaction history lookup
    GetCustomerTransactions,
    /// Customer or business analytics
    GetAnalytics,
}

impl ToolKind {
    /// All tools, in declaration order
    pub const ALL: [ToolKind; 6] = [
        Self::CheckPoints,
        Self::GetRecommendations,
        Self::ExplainReferrals,
        Self::GetBusinessInfo,
        Self::GetCustomerTransactions,
        Self::GetAnalytics,
    ];

    /// Returns the wire name of the tool
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckPoints => "check_points",
            Self::GetRecommendations => "get_recommendations",
            Self::ExplainReferrals => "explain_referrals",
            Self::GetBusinessInfo => "get_business_info",
            Self::GetCustomerTransactions => "get_customer_transactions",
            Self::GetAnalytics => "get_analytics",
        }
    }

    /// Parse a tool name from the model; `None` for anything outside the set
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "check_points" => Some(Self::CheckPoints),
            "get_recommendations" => Some(Self::GetRecommendations),
            "explain_referrals" => Some(Self::ExplainReferrals),
            "get_business_info" => Some(Self::GetBusinessInfo),
            "get_customer_transactions" => Some(Self::GetCustomerTransactions),
            "get_analytics" => Some(Self::GetAnalytics),
            _ => None,
        }
    }

    /// Whether this tool requires a `phone_number` argument
    #[must_use]
    pub fn requires_phone(&self) -> bool {
        matches!(
            self,
            Self::CheckPoints | Self::GetRecommendations | Self::GetCustomerTransactions
        )
    }

    /// Build the declaration sent to the model for this tool
    #[must_use]
    pub fn declaration(&self) -> ToolDefinition {
        match self {
            Self::CheckPoints => ToolDefinition::new(
                self.as_str(),
                "Check customer loyalty points balance and recent transactions",
                json!({
                    "type": "object",
                    "properties": {
                        "phone_number": {
                            "type": "string",
                            "description": "Customer phone number in international format (e.g., +1234567890)"
                        }
                    },
                    "required": ["phone_number"]
                }),
            ),
            Self::GetRecommendations => ToolDefinition::new(
                self.as_str(),
                "Get personalized recommendations for a customer",
                json!({
                    "type": "object",
                    "properties": {
                        "phone_number": {
                            "type": "string",
                            "description": "Customer phone number in international format"
                        },
                        "business_id": {
                            "type": "integer",
                            "description": "Optional business ID for business-specific recommendations"
                        }
                    },
                    "required": ["phone_number"]
                }),
            ),
            Self::ExplainReferrals => ToolDefinition::new(
                self.as_str(),
                "Explain how the referral system works",
                json!({
                    "type": "object",
                    "properties": {}
                }),
            ),
            Self::GetBusinessInfo => ToolDefinition::new(
                self.as_str(),
                "Get information about participating businesses",
                json!({
                    "type": "object",
                    "properties": {
                        "business_id": {
                            "type": "integer",
                            "description": "Optional business ID to get specific business info"
                        }
                    }
                }),
            ),
            Self::GetCustomerTransactions => ToolDefinition::new(
                self.as_str(),
                "Get a customer's recent transaction history",
                json!({
                    "type": "object",
                    "properties": {
                        "phone_number": {
                            "type": "string",
                            "description": "Customer phone number in international format"
                        },
                        "limit": {
                            "type": "integer",
                            "description": "Maximum number of transactions to return (default 20)"
                        }
                    },
                    "required": ["phone_number"]
                }),
            ),
            Self::GetAnalytics => ToolDefinition::new(
                self.as_str(),
                "Get analytics summaries for a customer or business",
                json!({
                    "type": "object",
                    "properties": {
                        "type": {
                            "type": "string",
                            "description": "Analytics type: customer or business"
                        },
                        "phone_number": {
                            "type": "string",
                            "description": "Customer phone number for customer analytics"
                        },
                        "business_id": {
                            "type": "integer",
                            "description": "Business ID for business analytics"
                        }
                    },
                    "required": ["type"]
                }),
            ),
        }
    }

    /// Declarations for the full tool set, ready to attach to a model request
    #[must_use]
    pub fn declarations() -> Vec<ToolDefinition> {
        Self::ALL.iter().map(Self::declaration).collect()
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

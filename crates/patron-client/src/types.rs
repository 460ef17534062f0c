//! Backend data shapes consumed by the widget

use serde::{Deserialize, Serialize};

/// Points summary for one customer
#[derive(Debug, Clone, Deserialize)]
pub struct PointsSummary {
    /// Current points balance
    pub total_points: i64,
    /// Most recent transactions, newest first
    #[serde(default)]
    pub recent_transactions: Vec<TransactionRecord>,
}

/// One ledger transaction as shown in the widget
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    /// Business where the transaction happened
    #[serde(default)]
    pub business_name: Option<String>,
    /// Points earned (negative for redemptions)
    #[serde(default)]
    pub points_earned: Option<i64>,
    /// Amount spent, if a purchase
    #[serde(default)]
    pub amount_spent: Option<f64>,
    /// Transaction kind (purchase, redemption, referral bonus, ...)
    #[serde(default)]
    pub transaction_type: Option<String>,
    /// Reward description, if a redemption
    #[serde(default)]
    pub reward_description: Option<String>,
    /// When the transaction happened
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A reward definition
#[derive(Debug, Clone, Deserialize)]
pub struct Reward {
    /// Reward name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Points cost to redeem
    pub points_required: i64,
    /// Program the reward belongs to
    #[serde(default)]
    pub loyalty_program_id: Option<i64>,
}

/// A reward the customer can currently see, with their balance in the
/// relevant program attached
#[derive(Debug, Clone, Deserialize)]
pub struct AvailableReward {
    /// The reward
    pub reward: Reward,
    /// The customer's points in the reward's program
    pub customer_points: i64,
}

/// Redemption request body for `POST /customers/redeem-reward`
#[derive(Debug, Clone, Serialize)]
pub struct RedemptionRequest {
    /// Customer phone number in international format
    pub customer_phone_number: String,
    /// Points to deduct; always the reward's `points_required`
    pub points_to_redeem: i64,
    /// Description recorded on the redemption transaction
    pub reward_description: String,
    /// Program to deduct from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty_program_id: Option<i64>,
}

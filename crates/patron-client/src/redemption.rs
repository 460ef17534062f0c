//! Redemption - two-step confirm flow for spending points
//!
//! Step one selects a reward the customer can afford (the widget disables
//! the control otherwise); step two confirms and yields exactly one
//! redemption request, always costing the reward's `points_required`.
//! Confirming consumes the selection, so a double-click cannot produce a
//! second request.

use crate::error::{Error, Result};
use crate::types::{AvailableReward, RedemptionRequest};

/// A selected reward awaiting confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRedemption {
    /// Reward name shown in the confirmation modal
    pub reward_name: String,
    /// Description recorded on the redemption
    pub reward_description: String,
    /// Point cost shown in the confirmation modal
    pub points_required: i64,
    /// Program to deduct from
    pub loyalty_program_id: Option<i64>,
}

/// Two-step redemption flow state
#[derive(Debug, Default)]
pub struct RedemptionFlow {
    pending: Option<PendingRedemption>,
}

impl RedemptionFlow {
    /// Create an idle flow with nothing selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the customer can afford this reward (drives the widget's
    /// enabled/disabled state)
    #[must_use]
    pub fn can_redeem(reward: &AvailableReward) -> bool {
        reward.customer_points >= reward.reward.points_required
    }

    /// Select a reward for confirmation. Fails if the customer cannot
    /// afford it; the UI should never offer that, but the model or a stale
    /// panel might.
    pub fn select(&mut self, reward: &AvailableReward) -> Result<&PendingRedemption> {
        if !Self::can_redeem(reward) {
            return Err(Error::Redemption(format!(
                "Not enough points for {}: requires {}, you have {}",
                reward.reward.name, reward.reward.points_required, reward.customer_points
            )));
        }

        Ok(self.pending.insert(PendingRedemption {
            reward_name: reward.reward.name.clone(),
            reward_description: reward.reward.description.clone(),
            points_required: reward.reward.points_required,
            loyalty_program_id: reward.reward.loyalty_program_id,
        }))
    }

    /// The selection awaiting confirmation, if any
    #[must_use]
    pub fn pending(&self) -> Option<&PendingRedemption> {
        self.pending.as_ref()
    }

    /// Drop the selection (the customer dismissed the modal)
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Confirm the selection, consuming it and yielding the single request
    /// to POST. Fails if nothing is selected.
    pub fn confirm(&mut self, phone: &str) -> Result<RedemptionRequest> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| Error::Redemption("No reward selected".to_string()))?;

        Ok(RedemptionRequest {
            customer_phone_number: phone.to_string(),
            points_to_redeem: pending.points_required,
            reward_description: pending.reward_description,
            loyalty_program_id: pending.loyalty_program_id,
        })
    }
}

//! Patron Client - widget-side loyalty lookups
//!
//! HTTP client for the parts of the customer widget that talk to the loyalty
//! backend directly (not through the assistant): points summary, recent
//! transactions, recommendations, available rewards, and the two-step reward
//! redemption flow.
//!
//! Dashboard loading is fail-soft: recommendations or rewards failing to
//! load never blocks the points display.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod redemption;
pub mod types;

pub use client::{Dashboard, LoyaltyClient};
pub use error::{Error, Result};
pub use redemption::{PendingRedemption, RedemptionFlow};
pub use types::{
    AvailableReward, PointsSummary, RedemptionRequest, Reward, TransactionRecord,
};

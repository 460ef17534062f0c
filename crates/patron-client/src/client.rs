//! Client - HTTP calls to the loyalty backend
//!
//! Each lookup is independently fetchable; [`LoyaltyClient::load_dashboard`]
//! combines them fail-soft so a broken recommendations endpoint never hides
//! the points balance.

use crate::error::{Error, Result};
use crate::types::{AvailableReward, PointsSummary, RedemptionRequest};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{9,15}$").expect("PHONE_RE is a compile-time constant"));

/// Everything the widget dashboard shows for one customer
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Points balance and recent transactions
    pub points: PointsSummary,
    /// Personalized recommendations (empty if the fetch failed)
    pub recommendations: Vec<String>,
    /// Rewards the customer can see (empty if the fetch failed)
    pub rewards: Vec<AvailableReward>,
}

/// HTTP client for the loyalty backend's customer endpoints
pub struct LoyaltyClient {
    client: reqwest::Client,
    base_url: String,
}

impl LoyaltyClient {
    /// Create a client for the given backend base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn validate_phone(phone: &str) -> Result<()> {
        if PHONE_RE.is_match(phone) {
            Ok(())
        } else {
            Err(Error::InvalidPhone(phone.to_string()))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(Error::NotFound);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Backend {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Points balance and recent transactions for a customer
    pub async fn points_summary(&self, phone: &str) -> Result<PointsSummary> {
        Self::validate_phone(phone)?;
        self.get_json(&format!("/customers/points/{phone}")).await
    }

    /// Personalized recommendations for a customer
    pub async fn recommendations(&self, phone: &str) -> Result<Vec<String>> {
        Self::validate_phone(phone)?;
        let body: Value = self
            .get_json(&format!("/customers/recommendations/{phone}"))
            .await?;
        Ok(body
            .get("recommendations")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Rewards the customer can currently see
    pub async fn available_rewards(&self, phone: &str) -> Result<Vec<AvailableReward>> {
        Self::validate_phone(phone)?;
        self.get_json(&format!("/customers/available-rewards/{phone}"))
            .await
    }

    /// Submit a redemption. On failure the backend's `detail` text is
    /// surfaced so the widget can display it verbatim.
    pub async fn redeem_reward(&self, request: &RedemptionRequest) -> Result<Value> {
        Self::validate_phone(&request.customer_phone_number)?;

        let url = format!("{}/customers/redeem-reward", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Backend {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Load the full dashboard. The points summary is required; the other
    /// panels degrade to empty on failure.
    pub async fn load_dashboard(&self, phone: &str) -> Result<Dashboard> {
        Self::validate_phone(phone)?;

        let (points, recommendations, rewards) = tokio::join!(
            self.points_summary(phone),
            self.recommendations(phone),
            self.available_rewards(phone),
        );

        let points = points?;

        let recommendations = recommendations.unwrap_or_else(|err| {
            warn!(error = %err, "recommendations unavailable, showing none");
            Vec::new()
        });
        let rewards = rewards.unwrap_or_else(|err| {
            warn!(error = %err, "available rewards unavailable, showing none");
            Vec::new()
        });

        Ok(Dashboard {
            points,
            recommendations,
            rewards,
        })
    }
}

/// Pull the FastAPI-style `detail` field out of an error body, falling back
/// to the raw text.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .and_then(Value::as_str)
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

//! Backend - access to the loyalty backend's generic tool endpoint
//!
//! The backend owns the loyalty ledger; this crate only calls its
//! `POST /mcp/tool` endpoint and hands the JSON body back. The executor
//! depends on the [`McpBackend`] trait so tests can script replies.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error as ThisError;
use tracing::{debug, warn};

/// A failed backend tool call
#[derive(Debug, ThisError)]
pub enum BackendError {
    /// Backend answered 404 (commonly: unknown phone number)
    #[error("not found")]
    NotFound,

    /// Backend answered a non-success status
    #[error("backend returned status {status}: {detail}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body detail, if any
        detail: String,
    },

    /// Backend could not be reached
    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

/// Trait over the backend's generic tool endpoint
#[async_trait]
pub trait McpBackend: Send + Sync {
    /// Invoke a backend tool, returning its JSON body verbatim
    async fn call_tool(
        &self,
        tool: &str,
        parameters: &Value,
    ) -> std::result::Result<Value, BackendError>;
}

/// HTTP implementation posting to `{base_url}/mcp/tool`
pub struct HttpMcpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMcpBackend {
    /// Create a backend client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(Error::InvalidUrl("backend url is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl McpBackend for HttpMcpBackend {
    async fn call_tool(
        &self,
        tool: &str,
        parameters: &Value,
    ) -> std::result::Result<Value, BackendError> {
        let url = format!("{}/mcp/tool", self.base_url);
        debug!(tool, %url, "calling backend tool endpoint");

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "tool": tool,
                "parameters": parameters,
                "context": {}
            }))
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(BackendError::NotFound);
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            warn!(tool, status = status.as_u16(), "backend tool call failed");
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("detail")
                        .and_then(Value::as_str)
                        .map(ToString::to_string)
                })
                .unwrap_or(body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Unreachable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let backend = HttpMcpBackend::new("http://localhost:8000/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_new_rejects_empty_url() {
        assert!(HttpMcpBackend::new("").is_err());
    }
}

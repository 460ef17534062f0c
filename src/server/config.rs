//! Server configuration from environment variables
//!
//! The server runs without a Gemini credential: chat then answers from the
//! fallback responder and `/api/config` reports the integration disabled.

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Loyalty backend base URL
    pub backend_url: String,
    /// Gemini API key; `None` disables the model integration
    pub gemini_api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `PORT` (default 5500), `BACKEND_API_URL` (default
    /// `http://localhost:8000`), and `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5500);

        let backend_url = std::env::var("BACKEND_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        Self {
            port,
            backend_url,
            gemini_api_key,
        }
    }

    /// Whether the Gemini integration is configured
    #[must_use]
    pub fn gemini_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_enabled_requires_key() {
        let config = ServerConfig {
            port: 5500,
            backend_url: "http://localhost:8000".to_string(),
            gemini_api_key: None,
        };
        assert!(!config.gemini_enabled());

        let config = ServerConfig {
            gemini_api_key: Some("AIza-test".to_string()),
            ..config
        };
        assert!(config.gemini_enabled());
    }
}

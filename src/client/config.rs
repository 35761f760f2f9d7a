//! Analysis client configuration.

use std::time::Duration;

/// Path of the analysis endpoint, relative to the base URL.
pub const ANALYZE_PATH: &str = "/api/v1/ml/analyze";

/// Origin used when the base URL is empty. The service's development server
/// listens here, mirroring the same-origin proxy of a browser deployment.
pub const SAME_ORIGIN_URL: &str = "http://localhost:8000";

const USER_AGENT: &str = concat!("pluto/", env!("CARGO_PKG_VERSION"));

/// Connection settings injected into the client and the lifecycle controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the analysis service. Empty means "same origin".
    pub base_url: String,
    /// Development configuration: an unreachable service yields demo data
    /// instead of an error.
    pub is_development: bool,
    /// Optional limit on establishing the TCP connection. The request itself
    /// is never given a deadline.
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            is_development: cfg!(debug_assertions),
            connect_timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_development(mut self, is_development: bool) -> Self {
        self.is_development = is_development;
        self
    }

    /// The origin requests go to, with the same-origin fallback applied.
    pub fn service_url(&self) -> &str {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            SAME_ORIGIN_URL
        } else {
            trimmed
        }
    }

    /// Full URL of the analysis endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.service_url(), ANALYZE_PATH)
    }
}

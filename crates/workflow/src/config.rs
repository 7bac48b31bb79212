//! API client configuration.

const API_URL_VAR: &str = "POTRACK_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Where the back-office API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Read the base URL from `POTRACK_API_URL`, falling back to the local
    /// development default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_VAR).unwrap_or_else(|_| {
            tracing::warn!("{API_URL_VAR} not set; using {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path (`path` must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

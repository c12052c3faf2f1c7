//! GAP API endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::lenient::string_or_number;

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("gap-client/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Tenant base URL (e.g., `https://grc.example.cloud`), without trailing slash.
    #[serde(default)]
    pub base_url: String,

    /// Account the client acts on. Sent as a path segment on every call.
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_id: String,

    /// Validate audit bodies before sending them instead of passing them through.
    #[serde(default)]
    pub strict_audits: bool,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            account_id: String::new(),
            strict_audits: false,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// `{base_url}/auth`
    pub fn auth_url(&self) -> String {
        format!("{}/auth", self.base())
    }

    /// `{base_url}/auth/token`, the OAuth2 token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}/token", self.auth_url())
    }

    /// `{base_url}/api-v1`
    pub fn api_url(&self) -> String {
        format!("{}/api-v1", self.base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert!(config.base_url.is_empty());
        assert!(config.account_id.is_empty());
        assert!(!config.strict_audits);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("gap-client/"));
    }

    #[test]
    fn derived_urls() {
        let config = ApiConfig {
            base_url: "https://grc.example.cloud/".into(),
            ..Default::default()
        };
        assert_eq!(config.auth_url(), "https://grc.example.cloud/auth");
        assert_eq!(config.token_url(), "https://grc.example.cloud/auth/token");
        assert_eq!(config.api_url(), "https://grc.example.cloud/api-v1");
    }
}

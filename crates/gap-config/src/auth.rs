//! Credentials configuration.

use serde::{Deserialize, Serialize};

use crate::lenient::string_or_number;

/// Either a static bearer token or an OAuth2 client-credentials pair.
///
/// A non-empty `client_token` takes precedence over the client pair.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// OAuth2 client id.
    #[serde(default, deserialize_with = "string_or_number")]
    pub client_id: String,

    /// OAuth2 client secret.
    #[serde(default, deserialize_with = "string_or_number")]
    pub client_secret: String,

    /// Static bearer token.
    #[serde(default, deserialize_with = "string_or_number")]
    pub client_token: String,
}

impl AuthConfig {
    pub fn uses_token(&self) -> bool {
        !self.client_token.is_empty()
    }

    pub fn has_client_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub fn is_configured(&self) -> bool {
        self.uses_token() || self.has_client_credentials()
    }
}

//! Bearer-token acquisition.
//!
//! Either a static token from configuration, or an OAuth2 client-credentials
//! exchange against `{base_url}/auth/token` whose result is cached until
//! shortly before it expires.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use gap_config::GapConfig;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::ClientError;

const EXPIRY_BUFFER: Duration = Duration::from_secs(30);
const DEFAULT_SCOPE: &str = "all";

/// How requests are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No `Authorization` header.
    Anonymous,
    /// Static `Authorization: Bearer <token>`.
    Bearer(String),
    /// OAuth2 client-credentials grant.
    ClientCredentials {
        client_id: String,
        client_secret: String,
        token_url: String,
        scope: String,
        resource: String,
    },
}

impl Credentials {
    /// A configured token wins over a client id/secret pair.
    #[must_use]
    pub fn from_config(config: &GapConfig) -> Self {
        if config.auth.uses_token() {
            Self::Bearer(config.auth.client_token.clone())
        } else if config.auth.has_client_credentials() {
            Self::ClientCredentials {
                client_id: config.auth.client_id.clone(),
                client_secret: config.auth.client_secret.clone(),
                token_url: config.api.token_url(),
                scope: DEFAULT_SCOPE.to_string(),
                resource: config.api.base_url.clone(),
            }
        } else {
            Self::Anonymous
        }
    }

    fn form_pairs(&self) -> Option<[(&'static str, &str); 5]> {
        let Self::ClientCredentials {
            client_id,
            client_secret,
            scope,
            resource,
            ..
        } = self
        else {
            return None;
        };
        Some([
            ("grant_type", "client_credentials"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("scope", scope.as_str()),
            ("resource", resource.as_str()),
        ])
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.refresh_at.is_none_or(|at| Instant::now() < at)
    }
}

/// Hands out bearer tokens, fetching and caching client-credentials tokens.
#[derive(Debug)]
pub struct Authenticator {
    credentials: Credentials,
    cached: RefCell<Option<CachedToken>>,
}

impl Authenticator {
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            cached: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn from_config(config: &GapConfig) -> Self {
        Self::new(Credentials::from_config(config))
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The token to send with the next request, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] if the token endpoint cannot be reached,
    /// rejects the credentials, or answers without an `access_token`.
    pub fn bearer_token(&self, http: &Client) -> Result<Option<String>, ClientError> {
        match &self.credentials {
            Credentials::Anonymous => Ok(None),
            Credentials::Bearer(token) => Ok(Some(token.clone())),
            Credentials::ClientCredentials { token_url, .. } => {
                if let Some(cached) = self.cached.borrow().as_ref().filter(|t| t.is_fresh()) {
                    return Ok(Some(cached.access_token.clone()));
                }
                let token = self.fetch_token(http, token_url)?;
                let access_token = token.access_token.clone();
                self.cached.replace(Some(token));
                Ok(Some(access_token))
            }
        }
    }

    fn fetch_token(&self, http: &Client, token_url: &str) -> Result<CachedToken, ClientError> {
        let Some(pairs) = self.credentials.form_pairs() else {
            return Err(ClientError::Auth("no client credentials configured".into()));
        };
        tracing::debug!(%token_url, "fetching client-credentials token");

        let resp = http
            .post(token_url)
            .form(&pairs)
            .send()
            .map_err(|e| ClientError::Auth(format!("token request: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(ClientError::Auth(format!(
                "token endpoint returned {}: {text}",
                status.as_u16()
            )));
        }
        let token: TokenResponse = resp
            .json()
            .map_err(|e| ClientError::Auth(format!("parse token: {e}")))?;

        let refresh_at = token
            .expires_in
            .map(|secs| Instant::now() + Duration::from_secs(secs).saturating_sub(EXPIRY_BUFFER));
        Ok(CachedToken {
            access_token: token.access_token,
            refresh_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gap_config::{ApiConfig, AuthConfig};
    use pretty_assertions::assert_eq;

    fn config(auth: AuthConfig) -> GapConfig {
        GapConfig {
            api: ApiConfig {
                base_url: "https://grc.example.cloud".into(),
                account_id: "42".into(),
                ..Default::default()
            },
            auth,
        }
    }

    #[test]
    fn token_wins_over_client_pair() {
        let creds = Credentials::from_config(&config(AuthConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
            client_token: "tok".into(),
        }));
        assert_eq!(creds, Credentials::Bearer("tok".into()));
    }

    #[test]
    fn client_pair_targets_token_endpoint() {
        let creds = Credentials::from_config(&config(AuthConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
            ..Default::default()
        }));
        assert_eq!(
            creds,
            Credentials::ClientCredentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
                token_url: "https://grc.example.cloud/auth/token".into(),
                scope: "all".into(),
                resource: "https://grc.example.cloud".into(),
            }
        );
    }

    #[test]
    fn form_pairs_follow_client_credentials_grant() {
        let creds = Credentials::ClientCredentials {
            client_id: "my id".into(),
            client_secret: "a&b".into(),
            token_url: "https://x.test/auth/token".into(),
            scope: "all".into(),
            resource: "https://x.test".into(),
        };
        assert_eq!(
            creds.form_pairs().unwrap(),
            [
                ("grant_type", "client_credentials"),
                ("client_id", "my id"),
                ("client_secret", "a&b"),
                ("scope", "all"),
                ("resource", "https://x.test"),
            ]
        );
        assert!(Credentials::Bearer("t".into()).form_pairs().is_none());
    }

    #[test]
    fn static_token_needs_no_request() {
        let auth = Authenticator::new(Credentials::Bearer("tok".into()));
        let http = Client::new();
        assert_eq!(auth.bearer_token(&http).unwrap(), Some("tok".to_string()));
        let anon = Authenticator::new(Credentials::Anonymous);
        assert_eq!(anon.bearer_token(&http).unwrap(), None);
    }

    #[test]
    fn cached_token_without_expiry_stays_fresh() {
        let token = CachedToken {
            access_token: "t".into(),
            refresh_at: None,
        };
        assert!(token.is_fresh());
        let stale = CachedToken {
            access_token: "t".into(),
            refresh_at: Some(Instant::now()),
        };
        assert!(!stale.is_fresh());
    }
}

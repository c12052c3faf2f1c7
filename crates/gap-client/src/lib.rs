//! # gap-client
//!
//! Blocking client for the GAP compliance API.
//!
//! [`GapClient`] wraps an [`HttpTransport`] and exposes audits, audit goals,
//! custom fields and account operations. List endpoints are flattened by the
//! pagination normalizer and every record passes through the `gap-core`
//! cleaners on its way in or out.
//!
//! A client built from incomplete configuration is *disabled*: every
//! operation returns [`ClientError::Disabled`] without touching the network.
//!
//! The client owns its session and account id. It is not `Sync` and is meant
//! for one caller at a time.

pub mod account;
pub mod audit_goals;
pub mod audits;
pub mod auth;
pub mod custom_fields;
pub mod http;
pub mod pagination;

mod error;

pub use audit_goals::merge_existing_first;
pub use auth::{Authenticator, Credentials};
pub use error::ClientError;
pub use http::{ApiRequest, HttpTransport, Method, ReqwestTransport};
pub use pagination::{Cleaner, OnCleanError, PageOptions, fetch_all_pages};

use gap_config::GapConfig;
use serde_json::Value;

// ── Types ──────────────────────────────────────────────────────────

/// Which branch an upsert took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record had the title; this is the created record.
    Created(Value),
    /// A record had the title; this is the server's answer to the patch.
    Patched(Value),
}

impl UpsertOutcome {
    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Created(v) | Self::Patched(v) => v,
        }
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// High-level GAP API client.
pub struct GapClient<T = ReqwestTransport> {
    transport: Option<T>,
    api_url: String,
    account_id: String,
    strict_audits: bool,
    error: Option<String>,
}

impl GapClient<ReqwestTransport> {
    /// Build a reqwest-backed client and select the configured account.
    ///
    /// Never fails: incomplete configuration yields a disabled client, and a
    /// failed account switch is logged.
    #[must_use]
    pub fn connect(config: &GapConfig) -> Self {
        if let Some(reason) = construction_error(config) {
            return Self::disabled(config, reason);
        }
        match ReqwestTransport::new(config) {
            Ok(transport) => Self::with_transport(config, transport),
            Err(e) => Self::disabled(config, e.to_string()),
        }
    }
}

impl<T: HttpTransport> GapClient<T> {
    /// Build a client over any transport and select the configured account.
    #[must_use]
    pub fn with_transport(config: &GapConfig, transport: T) -> Self {
        if let Some(reason) = construction_error(config) {
            return Self::disabled(config, reason);
        }
        let mut client = Self {
            transport: Some(transport),
            api_url: config.api.api_url(),
            account_id: config.api.account_id.clone(),
            strict_audits: config.api.strict_audits,
            error: None,
        };
        if let Err(e) = client.change_account(None) {
            tracing::warn!(
                error = %e,
                account_id = %client.account_id,
                "could not select account"
            );
        }
        client
    }

    fn disabled(config: &GapConfig, reason: String) -> Self {
        tracing::error!(%reason, "GAP client disabled");
        Self {
            transport: None,
            api_url: config.api.api_url(),
            account_id: config.api.account_id.clone(),
            strict_audits: config.api.strict_audits,
            error: Some(reason),
        }
    }

    /// Whether the client was built from complete configuration.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The construction-time problem that disabled the client, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Logs a welcome line. Useful to check the client is wired up.
    pub fn hello(&self) {
        match &self.error {
            None => tracing::info!(
                account_id = %self.account_id,
                api_url = %self.api_url,
                "Welcome to GAP"
            ),
            Some(reason) => tracing::warn!(%reason, "Welcome to GAP (client disabled)"),
        }
    }

    /// The transport, or the sticky construction error.
    fn ready(&self) -> Result<&T, ClientError> {
        if let Some(reason) = &self.error {
            return Err(ClientError::Disabled(reason.clone()));
        }
        self.transport
            .as_ref()
            .ok_or_else(|| ClientError::Disabled("no transport".into()))
    }

    /// `{api_url}/{account_id}/{path}`
    fn account_url(&self, path: &str) -> String {
        format!("{}/{}/{path}", self.api_url, self.account_id)
    }

    fn list(&self, path: &str, options: &PageOptions<'_>) -> Result<Vec<Value>, ClientError> {
        let transport = self.ready()?;
        fetch_all_pages(|url| transport.get(url), &self.account_url(path), options)
    }
}

/// The last missing required key, phrased the way the disabled client reports
/// it.
fn construction_error(config: &GapConfig) -> Option<String> {
    config
        .missing_required()
        .last()
        .map(|key| format!("No {key} specified"))
}

/// First entry of `records` whose `title` equals `title` exactly.
fn find_by_title(records: Vec<Value>, title: &str) -> Option<Value> {
    records
        .into_iter()
        .find(|r| r.get("title").and_then(Value::as_str) == Some(title))
}

/// The title an upsert body must carry.
fn upsert_title(raw: &Value) -> Result<&str, ClientError> {
    let body = raw
        .as_object()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ClientError::InvalidInput("No body specified".into()))?;
    body.get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ClientError::InvalidInput("No title specified in body".into()))
}

/// Server ids arrive as numbers or strings.
fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

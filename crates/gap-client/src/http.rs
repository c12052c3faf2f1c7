//! HTTP transport for the GAP API.
//!
//! [`HttpTransport`] is the seam the facade talks through: one method that
//! executes an [`ApiRequest`] and returns the decoded JSON body. The
//! production implementation is [`ReqwestTransport`] (blocking reqwest with
//! bearer auth); tests swap in a scripted fake.

use std::time::Duration;

use gap_config::GapConfig;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::auth::Authenticator;
use crate::error::ClientError;

pub use reqwest::Method;

// ── Request ────────────────────────────────────────────────────────

/// A single API call: method, absolute URL, optional JSON body, extra query
/// pairs and extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// The URL with `query` appended, percent-encoded.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let pairs = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{sep}{pairs}", self.url)
    }
}

// ── Transport ──────────────────────────────────────────────────────

/// Executes API requests and decodes their JSON bodies.
///
/// An empty response body decodes to [`Value::Null`].
pub trait HttpTransport {
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// an undecodable body.
    fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError>;

    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    fn get(&self, url: &str) -> Result<Value, ClientError> {
        self.execute(&ApiRequest::new(Method::GET, url))
    }

    /// POST with an optional JSON body and extra query parameters.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    fn post(
        &self,
        url: &str,
        body: Option<Value>,
        params: &[(&str, &str)],
    ) -> Result<Value, ClientError> {
        let mut request = ApiRequest::new(Method::POST, url);
        request.body = body;
        for (key, value) in params {
            request = request.with_query(*key, *value);
        }
        self.execute(&request)
    }

    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    fn put(&self, url: &str, body: Option<Value>) -> Result<Value, ClientError> {
        let mut request = ApiRequest::new(Method::PUT, url);
        request.body = body;
        self.execute(&request)
    }

    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    fn patch(&self, url: &str, body: Option<Value>) -> Result<Value, ClientError> {
        let mut request = ApiRequest::new(Method::PATCH, url);
        request.body = body;
        self.execute(&request)
    }

    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    fn delete(&self, url: &str) -> Result<Value, ClientError> {
        self.execute(&ApiRequest::new(Method::DELETE, url))
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError> {
        (**self).execute(request)
    }
}

// ── Reqwest ────────────────────────────────────────────────────────

/// Blocking reqwest transport with bearer authentication.
///
/// Holds a token cache behind a `RefCell`, so it is single-owner and not
/// `Sync`.
pub struct ReqwestTransport {
    http: Client,
    auth: Authenticator,
}

impl ReqwestTransport {
    /// Build a transport from configuration: user agent, timeout, JSON
    /// `Accept` header and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the reqwest client fails to build.
    pub fn new(config: &GapConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .user_agent(config.api.user_agent.clone())
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .default_headers(headers)
            .build()?;
        Ok(Self::with_client(http, Authenticator::from_config(config)))
    }

    #[must_use]
    pub const fn with_client(http: Client, auth: Authenticator) -> Self {
        Self { http, auth }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError> {
        let url = request.full_url();
        tracing::debug!(method = %request.method, %url, "GAP request");

        let mut builder = self.http.request(request.method.clone(), &url);
        if let Some(token) = self.auth.bearer_token(&self.http)? {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = check_response(builder.send()?)?;
        decode_body(resp)
    }
}

// ── Response helpers ───────────────────────────────────────────────

/// Check a response for common error conditions.
///
/// - **429 Too Many Requests** → [`ClientError::RateLimited`] with
///   `Retry-After` parsing (falls back to 60 s).
/// - **Non-success status** → [`ClientError::Api`] with status and body.
pub fn check_response(resp: Response) -> Result<Response, ClientError> {
    if resp.status() == 429 {
        return Err(ClientError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(ClientError::Api {
            status: resp.status().as_u16(),
            body: resp.text().unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

fn decode_body(resp: Response) -> Result<Value, ClientError> {
    let text = resp.text()?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| {
        let snippet: String = text.chars().take(120).collect();
        ClientError::Parse(format!("{e}: {snippet}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_url_without_query_is_unchanged() {
        let req = ApiRequest::new(Method::GET, "https://x.test/api-v1/42/audits");
        assert_eq!(req.full_url(), "https://x.test/api-v1/42/audits");
    }

    #[test]
    fn full_url_encodes_query_pairs() {
        let req = ApiRequest::new(Method::POST, "https://x.test/change")
            .with_query("account_id", "42")
            .with_query("note", "a b&c");
        assert_eq!(
            req.full_url(),
            "https://x.test/change?account_id=42&note=a%20b%26c"
        );
    }

    #[test]
    fn full_url_appends_to_existing_query() {
        let req = ApiRequest::new(Method::GET, "https://x.test/audits?page=2").with_query("q", "1");
        assert_eq!(req.full_url(), "https://x.test/audits?page=2&q=1");
    }

    #[test]
    fn helpers_build_expected_requests() {
        struct Echo;
        impl HttpTransport for Echo {
            fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError> {
                Ok(serde_json::json!({
                    "method": request.method.as_str(),
                    "url": request.url,
                    "body": request.body,
                }))
            }
        }

        let echo = Echo;
        let got = echo
            .put("https://x.test/g/1", Some(serde_json::json!({"a": 1})))
            .unwrap();
        assert_eq!(got["method"], "PUT");
        assert_eq!(got["body"]["a"], 1);
        let by_ref = &echo;
        let got = by_ref.delete("https://x.test/g/1").unwrap();
        assert_eq!(got["method"], "DELETE");
        assert!(got["body"].is_null());

        let got = echo
            .post("https://x.test/change/7", None, &[("account_id", "7")])
            .unwrap();
        assert_eq!(got["method"], "POST");
        assert_eq!(got["url"], "https://x.test/change/7");
    }
}

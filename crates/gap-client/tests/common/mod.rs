//! Shared fixtures for the facade tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use gap_client::{ApiRequest, ClientError, HttpTransport, Method};
use gap_config::{ApiConfig, AuthConfig, GapConfig};
use serde_json::{Value, json};

pub const API: &str = "https://gap.test/api-v1";

/// `{API}/42/{path}`
pub fn account_url(path: &str) -> String {
    format!("{API}/42/{path}")
}

pub fn config() -> GapConfig {
    GapConfig {
        api: ApiConfig {
            base_url: "https://gap.test".into(),
            account_id: "42".into(),
            ..Default::default()
        },
        auth: AuthConfig {
            client_token: "tok".into(),
            ..Default::default()
        },
    }
}

/// In-memory transport answering from a route table and recording every
/// request it sees.
///
/// Each route holds a queue of responses; the last one repeats. Unknown
/// routes answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: RefCell<HashMap<(Method, String), VecDeque<Value>>>,
    calls: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// A transport that already accepts the account selection made at
    /// construction.
    pub fn new() -> Self {
        Self::default().on(
            Method::POST,
            &format!("{API}/account/change-account/42"),
            json!({"status": "ok"}),
        )
    }

    #[must_use]
    pub fn on(self, method: Method, url: &str, response: Value) -> Self {
        self.routes
            .borrow_mut()
            .entry((method, url.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }

    /// Requests other than the construction-time account selection.
    pub fn api_calls(&self) -> Vec<ApiRequest> {
        self.calls()
            .into_iter()
            .filter(|r| !r.url.contains("/account/change-account/"))
            .collect()
    }

    pub fn count(&self, method: &Method, url: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|r| &r.method == method && r.url == url)
            .count()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: &ApiRequest) -> Result<Value, ClientError> {
        self.calls.borrow_mut().push(request.clone());
        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .get_mut(&(request.method.clone(), request.url.clone()))
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ClientError::Api {
                status: 404,
                body: format!("no route for {} {}", request.method, request.url),
            })?;
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap_or_default())
        } else {
            Ok(queue.front().cloned().unwrap_or_default())
        }
    }
}

/// A single-page envelope.
pub fn page(data: Value) -> Value {
    json!({"data": data, "next_page_url": null})
}

//! Audit operations.

use gap_core::{clean_audit_in, clean_audit_out};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{ApiRequest, HttpTransport, Method};
use crate::pagination::PageOptions;
use crate::{GapClient, UpsertOutcome, find_by_title, record_id, upsert_title};

const AUDITS: &str = "audits";

impl<T: HttpTransport> GapClient<T> {
    /// Every audit in the account, across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled or any page fails.
    pub fn get_audits(&self) -> Result<Vec<Value>, ClientError> {
        let strict = self.strict_audits;
        let clean = move |raw: &Value| clean_audit_in(raw, strict);
        self.list(AUDITS, &PageOptions::default().cleaner(&clean))
    }

    /// The first audit whose title matches exactly.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::get_audits`].
    pub fn get_audit_by_title(&self, title: &str) -> Result<Option<Value>, ClientError> {
        Ok(find_by_title(self.get_audits()?, title))
    }

    /// Create an audit and return the server's record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for an empty body, a cleaning
    /// error in strict mode, or any request failure.
    pub fn create_audit(&self, raw: &Value) -> Result<Value, ClientError> {
        let transport = self.ready()?;
        let body = self.audit_body(raw)?;
        let created = transport.post(&self.account_url(AUDITS), Some(body), &[])?;
        tracing::debug!(title = ?created.get("title"), "audit created");
        Ok(created)
    }

    /// Patch an audit.
    ///
    /// Sent as `PATCH` with an `_method: patch` header for servers that route
    /// method overrides.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::create_audit`].
    pub fn patch_audit(&self, id: &str, raw: &Value) -> Result<Value, ClientError> {
        let transport = self.ready()?;
        let body = self.audit_body(raw)?;
        let request = ApiRequest::new(Method::PATCH, self.account_url(&format!("{AUDITS}/{id}")))
            .with_body(body)
            .with_header("_method", "patch");
        transport.execute(&request)
    }

    /// Delete an audit.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled or the request fails.
    pub fn delete_audit(&self, id: &str) -> Result<(), ClientError> {
        let transport = self.ready()?;
        transport.delete(&self.account_url(&format!("{AUDITS}/{id}")))?;
        tracing::debug!(id, "audit deleted");
        Ok(())
    }

    /// Create the audit if no audit has its title, otherwise patch the
    /// existing one with `raw`.
    ///
    /// The lookup runs over the uncleaned listing so the server id is always
    /// available.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] without a body or title, and
    /// any error from the lookup, create or patch.
    pub fn upsert_audit(&self, raw: &Value) -> Result<UpsertOutcome, ClientError> {
        self.ready()?;
        let title = upsert_title(raw)?;
        match self.find_audit(title)? {
            None => self.create_audit(raw).map(UpsertOutcome::Created),
            Some(existing) => {
                let id = record_id(&existing)
                    .ok_or_else(|| ClientError::Parse(format!("audit '{title}' has no id")))?;
                self.patch_audit(&id, raw).map(UpsertOutcome::Patched)
            }
        }
    }

    fn find_audit(&self, title: &str) -> Result<Option<Value>, ClientError> {
        Ok(find_by_title(self.list(AUDITS, &PageOptions::default())?, title))
    }

    fn audit_body(&self, raw: &Value) -> Result<Value, ClientError> {
        if raw.as_object().is_none_or(serde_json::Map::is_empty) {
            return Err(ClientError::InvalidInput("No audit specified".into()));
        }
        Ok(clean_audit_out(raw, self.strict_audits)?)
    }
}

//! Audit goal operations.

use gap_core::{AuditGoalRecord, CleanError, clean_audit_goal_in, clean_audit_goal_out};
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::http::HttpTransport;
use crate::pagination::PageOptions;
use crate::{GapClient, UpsertOutcome, find_by_title, record_id, upsert_title};

const AUDIT_GOALS: &str = "audit-goals";

/// Keys carried from the existing record into an upsert patch.
pub const MERGE_FIELDS: [&str; 8] = [
    "title",
    "description",
    "parent_id",
    "status",
    "guide",
    "documentation",
    "note",
    "icon",
];

/// Build an upsert patch body from an existing record and an incoming one.
///
/// For each key in [`MERGE_FIELDS`]: a key present on `existing` keeps the
/// existing value, else the incoming value is used, else null. Existing
/// values win over incoming ones.
#[must_use]
pub fn merge_existing_first(existing: &Value, incoming: &Value) -> Value {
    let body: Map<String, Value> = MERGE_FIELDS
        .iter()
        .map(|&key| {
            let value = existing
                .get(key)
                .or_else(|| incoming.get(key))
                .cloned()
                .unwrap_or(Value::Null);
            (key.to_string(), value)
        })
        .collect();
    Value::Object(body)
}

fn clean_in_value(raw: &Value) -> Result<Value, CleanError> {
    Ok(serde_json::to_value(clean_audit_goal_in(raw)?)?)
}

fn into_records(values: Vec<Value>) -> Result<Vec<AuditGoalRecord>, ClientError> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(ClientError::from))
        .collect()
}

impl<T: HttpTransport> GapClient<T> {
    /// Every audit goal in the account, as the server sends them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled or any page fails.
    pub fn get_audit_goals(&self) -> Result<Vec<Value>, ClientError> {
        self.list(AUDIT_GOALS, &PageOptions::default())
    }

    /// The goal(s) the server returns for `id`, cleaned.
    ///
    /// # Errors
    ///
    /// Unlike list calls, the first record that fails cleaning fails the
    /// whole call.
    pub fn get_audit_goal(&self, id: &str) -> Result<Vec<AuditGoalRecord>, ClientError> {
        let options = PageOptions::default()
            .cleaner(&clean_in_value)
            .abort_on_clean_error();
        into_records(self.list(&format!("{AUDIT_GOALS}/{id}"), &options)?)
    }

    /// The first goal whose title matches exactly, cleaned.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the listing fails or the match does not
    /// clean.
    pub fn get_audit_goal_by_title(
        &self,
        title: &str,
    ) -> Result<Option<AuditGoalRecord>, ClientError> {
        self.find_audit_goal(title)?
            .map(|raw| clean_audit_goal_in(&raw).map_err(ClientError::from))
            .transpose()
    }

    /// Clean `raw` for creation, post it, and clean the server's answer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Clean`] if either side fails cleaning, or any
    /// request failure.
    pub fn create_audit_goal(&self, raw: &Value) -> Result<AuditGoalRecord, ClientError> {
        let transport = self.ready()?;
        let body = serde_json::to_value(clean_audit_goal_out(raw)?)?;
        let created = transport.post(&self.account_url(AUDIT_GOALS), Some(body), &[])?;
        let goal = clean_audit_goal_in(&created)?;
        tracing::debug!(title = %goal.title, "audit goal created");
        Ok(goal)
    }

    /// Replace an audit goal with `body` (sent as `PUT`) and return the
    /// server's answer.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled or the request fails.
    pub fn patch_audit_goal(&self, id: &str, body: &Value) -> Result<Value, ClientError> {
        let transport = self.ready()?;
        transport.put(
            &self.account_url(&format!("{AUDIT_GOALS}/{id}")),
            Some(body.clone()),
        )
    }

    /// Delete an audit goal.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled or the request fails.
    pub fn delete_audit_goal(&self, id: &str) -> Result<(), ClientError> {
        let transport = self.ready()?;
        transport.delete(&self.account_url(&format!("{AUDIT_GOALS}/{id}")))?;
        tracing::debug!(id, "audit goal deleted");
        Ok(())
    }

    /// Create the goal if no goal has its title, otherwise patch the existing
    /// goal with [`merge_existing_first`] of the cleaned existing record and
    /// `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] without a body or title, and
    /// any error from the lookup, cleaning, create or patch.
    pub fn upsert_audit_goal_by_title(&self, raw: &Value) -> Result<UpsertOutcome, ClientError> {
        self.ready()?;
        let title = upsert_title(raw)?;
        let Some(listed) = self.find_audit_goal(title)? else {
            let created = self.create_audit_goal(raw)?;
            return Ok(UpsertOutcome::Created(serde_json::to_value(created)?));
        };

        let id = record_id(&listed)
            .ok_or_else(|| ClientError::Parse(format!("audit goal '{title}' has no id")))?;
        let existing = serde_json::to_value(clean_audit_goal_in(&listed)?)?;
        let body = merge_existing_first(&existing, raw);
        tracing::debug!(%id, title, "patching existing audit goal");
        self.patch_audit_goal(&id, &body).map(UpsertOutcome::Patched)
    }

    fn find_audit_goal(&self, title: &str) -> Result<Option<Value>, ClientError> {
        Ok(find_by_title(self.get_audit_goals()?, title))
    }
}

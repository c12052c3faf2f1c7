//! Custom field operations.
//!
//! The server groups custom fields by owner (`type` on the group, one of
//! [`FieldGroup`]) and nests the definitions under `fields`. Listing
//! flattens the groups and copies the group's identity onto every field.

use std::collections::HashSet;

use gap_core::{CleanError, CustomFieldRecord, FieldGroup, clean_custom_field};
use serde_json::{Value, json};

use crate::error::ClientError;
use crate::http::HttpTransport;
use crate::pagination::PageOptions;
use crate::GapClient;

const CUSTOM_FIELDS: &str = "custom-fields";

/// Group fields copied onto each listed custom field. The group's `type`
/// replaces the field's own `type`.
pub const LIFTED_GROUP_FIELDS: [&str; 4] = ["account_id", "type", "created_at", "updated_at"];

fn clean_value(raw: &Value) -> Result<Value, CleanError> {
    Ok(serde_json::to_value(clean_custom_field(raw)?)?)
}

impl<T: HttpTransport> GapClient<T> {
    /// Every custom field in the account, flattened out of its group.
    ///
    /// Fields that fail cleaning are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled or any page fails.
    pub fn get_custom_fields(&self) -> Result<Vec<Value>, ClientError> {
        let options = PageOptions::default()
            .sub_field("fields")
            .cleaner(&clean_value)
            .lift(&LIFTED_GROUP_FIELDS);
        self.list(CUSTOM_FIELDS, &options)
    }

    /// Create one custom field in `group` and return the cleaned fields the
    /// server answers with.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Clean`] if `raw` does not clean, or any
    /// request failure.
    pub fn create_custom_field(
        &self,
        group: FieldGroup,
        raw: &Value,
    ) -> Result<Vec<CustomFieldRecord>, ClientError> {
        let transport = self.ready()?;
        let field = clean_custom_field(raw)?;
        let body = json!({
            "account_id": self.account_id,
            "type": group.as_str(),
            "fields": [field],
        });
        let created = transport.post(&self.account_url(CUSTOM_FIELDS), Some(body), &[])?;

        let fields = created
            .get("fields")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Ok(fields
            .iter()
            .filter_map(|f| match clean_custom_field(f) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, %group, "Error cleaning created field, skipping");
                    None
                }
            })
            .collect())
    }

    /// Create each field of `raws` whose name is not already defined in
    /// `group`. Returns the newly created records.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on the first field that does not clean or
    /// the first failed request.
    pub fn upsert_custom_fields(
        &self,
        group: FieldGroup,
        raws: &[Value],
    ) -> Result<Vec<CustomFieldRecord>, ClientError> {
        self.ready()?;
        let mut known: HashSet<String> = self
            .get_custom_fields()?
            .iter()
            .filter(|f| f.get("type").and_then(Value::as_str) == Some(group.as_str()))
            .filter_map(|f| f.get("name").and_then(Value::as_str).map(str::to_string))
            .collect();

        let mut created = Vec::new();
        for raw in raws {
            let field = clean_custom_field(raw)?;
            if known.contains(&field.name) {
                tracing::debug!(name = %field.name, %group, "custom field exists, skipping");
                continue;
            }
            known.insert(field.name.clone());
            created.extend(self.create_custom_field(group, raw)?);
        }
        Ok(created)
    }
}

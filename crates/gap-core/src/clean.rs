//! Cleaners: loosely-shaped JSON in, exact server record shape out.
//!
//! The `*_out` variants shape request bodies, the `*_in` variants shape what
//! the server sends back. Every cleaner rejects a record that lacks its
//! required field instead of passing a partial record through.

use serde_json::{Map, Value, json};

use crate::enums::{FieldType, Status};
use crate::errors::CleanError;
use crate::records::{
    AuditGoalRecord, AuditRecord, CustomFieldRecord, DEFAULT_STATUS_OPTIONS_JSON, GoalSettings,
};

const AUDIT: &str = "raw_audit";
const AUDIT_GOAL: &str = "raw_audit_goal";

/// Whether `status` is a server-side dynamic status (a JSON-encoded object).
///
/// These are passed through untouched so new statuses configured on the
/// server do not break cleaning.
#[must_use]
pub fn is_dynamic_status(status: &str) -> bool {
    status.starts_with('{')
}

/// Shape an audit goal for a create request.
///
/// # Errors
///
/// Returns [`CleanError`] if the record is empty, has no title, or carries
/// an unrecognised status.
pub fn clean_audit_goal_out(raw: &Value) -> Result<AuditGoalRecord, CleanError> {
    let mut goal = clean_audit_goal(raw)?;
    goal.settings = Some(GoalSettings::default());
    tracing::debug!(title = %goal.title, "cleaned outbound audit goal");
    Ok(goal)
}

/// Shape an audit goal returned by the server.
///
/// # Errors
///
/// Same conditions as [`clean_audit_goal_out`].
pub fn clean_audit_goal_in(raw: &Value) -> Result<AuditGoalRecord, CleanError> {
    let goal = clean_audit_goal(raw)?;
    tracing::debug!(title = %goal.title, "cleaned inbound audit goal");
    Ok(goal)
}

fn clean_audit_goal(raw: &Value) -> Result<AuditGoalRecord, CleanError> {
    let record = non_empty_object(raw, AUDIT_GOAL)?;
    let title = required_title(record, AUDIT_GOAL)?;
    check_status(record.get("status"), AUDIT_GOAL)?;

    Ok(AuditGoalRecord {
        title,
        description: field_or(record, "description", Value::Null),
        parent_id: field_or(record, "parent_id", json!("")),
        guide: field_or(record, "guide", json!("")),
        documentation: field_or(record, "documentation", json!("")),
        note: field_or(record, "note", json!("")),
        settings: None,
    })
}

/// Shape a custom field definition.
///
/// A missing `type` defaults to `text`.
///
/// # Errors
///
/// Returns [`CleanError::MissingName`] without a name and
/// [`CleanError::InvalidFieldType`] for a type outside [`FieldType::ALL`].
pub fn clean_custom_field(raw: &Value) -> Result<CustomFieldRecord, CleanError> {
    let record = raw
        .as_object()
        .filter(|map| !map.is_empty())
        .ok_or(CleanError::MissingName)?;
    let name = match record.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            tracing::info!(field = %raw, "custom field is missing its name");
            return Err(CleanError::MissingName);
        }
    };
    let field_type = match record.get("type") {
        None | Some(Value::Null) => FieldType::default(),
        Some(Value::String(ty)) => ty
            .parse()
            .map_err(|_| CleanError::InvalidFieldType(ty.clone()))?,
        Some(other) => return Err(CleanError::InvalidFieldType(other.to_string())),
    };

    Ok(CustomFieldRecord {
        name,
        field_type,
        slug: field_or(record, "slug", Value::Null),
        in_table: field_or(record, "in_table", Value::Bool(true)),
        options: field_or(record, "options", json!([])),
        toggle_default: field_or(record, "toggleDefault", Value::Bool(false)),
        select_default: field_or(record, "selectDefault", Value::Null),
        multi_select_default: field_or(record, "multiSelectDefault", json!([])),
    })
}

/// Shape an audit for a create or patch request.
///
/// Unless `strict` is set the body is passed through unchanged: the server
/// accepts partial audits on patch and arbitrary custom-field keys.
///
/// # Errors
///
/// In strict mode, returns [`CleanError`] for an empty record, a missing
/// title, or an unrecognised `overall_status`.
pub fn clean_audit_out(raw: &Value, strict: bool) -> Result<Value, CleanError> {
    if !strict {
        return Ok(raw.clone());
    }
    let mut audit = clean_audit(raw)?;
    audit.status_options = Some(DEFAULT_STATUS_OPTIONS_JSON.clone());
    Ok(serde_json::to_value(audit)?)
}

/// Shape an audit returned by the server. See [`clean_audit_out`].
///
/// # Errors
///
/// Same conditions as [`clean_audit_out`].
pub fn clean_audit_in(raw: &Value, strict: bool) -> Result<Value, CleanError> {
    if !strict {
        return Ok(raw.clone());
    }
    let mut audit = clean_audit(raw)?;
    audit.id = raw.get("id").filter(|id| !id.is_null()).cloned();
    Ok(serde_json::to_value(audit)?)
}

fn clean_audit(raw: &Value) -> Result<AuditRecord, CleanError> {
    let record = non_empty_object(raw, AUDIT)?;
    let title = required_title(record, AUDIT)?;
    let overall_status = check_status(record.get("overall_status"), AUDIT)?;

    Ok(AuditRecord {
        id: None,
        title,
        description: field_or(record, "description", Value::Null),
        status_options: None,
        default_status_options: DEFAULT_STATUS_OPTIONS_JSON.clone(),
        overall_status,
        note: field_or(record, "note", Value::Null),
    })
}

/// Memberships are consumed as the server sends them.
///
/// # Errors
///
/// Never fails; the signature matches the other cleaners.
pub fn clean_membership(raw: &Value) -> Result<Value, CleanError> {
    Ok(raw.clone())
}

// ── Helpers ────────────────────────────────────────────────────────

fn non_empty_object<'a>(
    raw: &'a Value,
    kind: &'static str,
) -> Result<&'a Map<String, Value>, CleanError> {
    raw.as_object()
        .filter(|map| !map.is_empty())
        .ok_or(CleanError::MissingRecord { kind })
}

fn required_title(record: &Map<String, Value>, kind: &'static str) -> Result<String, CleanError> {
    match record.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => Ok(title.to_string()),
        _ => Err(CleanError::MissingTitle { kind }),
    }
}

/// Validate a status slot, returning the effective status string.
///
/// Absent, null and empty values fall back to `not_started`.
fn check_status(value: Option<&Value>, kind: &'static str) -> Result<String, CleanError> {
    match value {
        None | Some(Value::Null) => Ok(Status::default().to_string()),
        Some(Value::String(s)) if s.is_empty() => Ok(Status::default().to_string()),
        Some(Value::String(s)) if Status::is_valid(s) || is_dynamic_status(s) => Ok(s.clone()),
        Some(Value::String(s)) => Err(CleanError::InvalidStatus {
            value: s.clone(),
            kind,
        }),
        Some(other) => Err(CleanError::InvalidStatus {
            value: other.to_string(),
            kind,
        }),
    }
}

/// The value stored under `key`, or `default` when the key is absent.
///
/// A key that is present with an explicit `null` keeps its `null`.
fn field_or(record: &Map<String, Value>, key: &str, default: Value) -> Value {
    record.get(key).cloned().unwrap_or(default)
}

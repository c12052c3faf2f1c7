//! Record shapes sent to and read back from the GAP API.
//!
//! Fields the server treats as free-form (descriptions, HTML guides, numeric
//! or string parent ids) are kept as [`serde_json::Value`] so cleaning never
//! changes a value it only passes through.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

use crate::enums::{FieldType, Status};

// ── Status options ─────────────────────────────────────────────────

/// One status badge of an audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    pub name: Status,
    pub color: String,
}

/// The three badges every new audit starts with.
pub static DEFAULT_STATUS_OPTIONS: LazyLock<Vec<StatusOption>> = LazyLock::new(|| {
    [
        (Status::NotStarted, "secondary"),
        (Status::InProgress, "warning"),
        (Status::Completed, "success"),
    ]
    .into_iter()
    .map(|(name, color)| StatusOption {
        name,
        color: color.to_string(),
    })
    .collect()
});

/// [`DEFAULT_STATUS_OPTIONS`] in the string-encoded form the server stores.
pub static DEFAULT_STATUS_OPTIONS_JSON: LazyLock<String> = LazyLock::new(|| {
    let badges: Vec<String> = DEFAULT_STATUS_OPTIONS
        .iter()
        .map(|o| format!(r#"{{"name":"{}","color":"{}"}}"#, o.name, o.color))
        .collect();
    format!("[{}]", badges.join(","))
});

// ── Audit ──────────────────────────────────────────────────────────

/// Strictly cleaned audit body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Server id. Only carried on records read back from the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub title: String,
    pub description: Value,
    /// Only sent on the outbound (create/patch) side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_options: Option<String>,
    pub default_status_options: String,
    pub overall_status: String,
    pub note: Value,
}

// ── Audit goal ─────────────────────────────────────────────────────

/// Feature toggles sent with every new audit goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct GoalSettings {
    #[serde(rename = "titleBold")]
    pub title_bold: bool,
    pub included_in_dashboard: bool,
    #[serde(rename = "descriptionEnabled")]
    pub description_enabled: bool,
    #[serde(rename = "guideEnabled")]
    pub guide_enabled: bool,
    #[serde(rename = "documentationEnabled")]
    pub documentation_enabled: bool,
    pub general_report: bool,
    pub attachments: bool,
    #[serde(rename = "elementsEnabled")]
    pub elements_enabled: bool,
    #[serde(rename = "statusEnabled")]
    pub status_enabled: bool,
    #[serde(rename = "tasksEnabled")]
    pub tasks_enabled: bool,
    #[serde(rename = "customFieldsEnabled")]
    pub custom_fields_enabled: bool,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            title_bold: false,
            included_in_dashboard: true,
            description_enabled: true,
            guide_enabled: true,
            documentation_enabled: true,
            general_report: false,
            attachments: true,
            elements_enabled: true,
            status_enabled: true,
            tasks_enabled: true,
            custom_fields_enabled: true,
        }
    }
}

/// Cleaned audit goal body. Goals never carry an icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditGoalRecord {
    pub title: String,
    pub description: Value,
    pub parent_id: Value,
    pub guide: Value,
    pub documentation: Value,
    pub note: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GoalSettings>,
}

// ── Custom field ───────────────────────────────────────────────────

/// Cleaned custom field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub slug: Value,
    pub in_table: Value,
    pub options: Value,
    #[serde(rename = "toggleDefault")]
    pub toggle_default: Value,
    #[serde(rename = "selectDefault")]
    pub select_default: Value,
    #[serde(rename = "multiSelectDefault")]
    pub multi_select_default: Value,
}

//! Closed enums for the GAP vocabulary.
//!
//! Every enum serializes to the exact string the server uses and offers an
//! `is_valid` predicate so arbitrary input strings can be tested for
//! membership without constructing a value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseEnumError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Progress status of an audit or audit goal.
///
/// ```text
/// not_started → in_progress → completed
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Whether `value` is the string form of a status.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Icon
// ---------------------------------------------------------------------------

/// Icon shown next to an audit in the GAP UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    People,
    Book,
    Bank,
    Warning,
    Hashtag,
}

impl Icon {
    pub const ALL: [Self; 5] = [
        Self::People,
        Self::Book,
        Self::Bank,
        Self::Warning,
        Self::Hashtag,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::People => "people",
            Self::Book => "book",
            Self::Bank => "bank",
            Self::Warning => "warning",
            Self::Hashtag => "hashtag",
        }
    }

    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Icon {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "icon",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// Input widget type of a custom field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    MultiSelect,
    RichArea,
    Select,
    #[default]
    Text,
    TextArea,
}

impl FieldType {
    pub const ALL: [Self; 5] = [
        Self::MultiSelect,
        Self::RichArea,
        Self::Select,
        Self::Text,
        Self::TextArea,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultiSelect => "multiSelect",
            Self::RichArea => "richArea",
            Self::Select => "select",
            Self::Text => "text",
            Self::TextArea => "textArea",
        }
    }

    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "field type",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// FieldGroup
// ---------------------------------------------------------------------------

/// Entity kind that owns a group of custom fields.
///
/// `data_recepients` is spelled the way the server spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    DataRecepients,
    DataResponsible,
    EventLogs,
    ItSystem,
    ProjectAuditGoals,
    WorkProcesses,
}

impl FieldGroup {
    pub const ALL: [Self; 6] = [
        Self::DataRecepients,
        Self::DataResponsible,
        Self::EventLogs,
        Self::ItSystem,
        Self::ProjectAuditGoals,
        Self::WorkProcesses,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataRecepients => "data_recepients",
            Self::DataResponsible => "data_responsible",
            Self::EventLogs => "event_logs",
            Self::ItSystem => "it_system",
            Self::ProjectAuditGoals => "project_audit_goals",
            Self::WorkProcesses => "work_processes",
        }
    }

    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldGroup {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "field group",
                value: s.to_string(),
            })
    }
}

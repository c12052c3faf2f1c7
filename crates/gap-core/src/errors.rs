//! Error types for record cleaning and enum parsing.
//!
//! Transport errors live in `gap-client`; the errors here are pure logic
//! failures and never carry I/O state.

use thiserror::Error;

use crate::enums::Status;

/// A record could not be cleaned into the shape the server expects.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The input was null, empty, or not a JSON object.
    #[error("No {kind}")]
    MissingRecord { kind: &'static str },

    /// The required `title` was absent or empty.
    #[error("No title for {kind}")]
    MissingTitle { kind: &'static str },

    /// A status was neither a known member, empty, nor a dynamic `{...}` status.
    ///
    /// Goal messages also name the status the server falls back to.
    #[error("Invalid status '{value}'{} for {kind}", fallback_hint(.kind))]
    InvalidStatus { value: String, kind: &'static str },

    /// A custom field without its required `name`.
    #[error("Skipping custom field missing required name")]
    MissingName,

    /// A custom field `type` outside the supported set.
    #[error("Invalid field type {0}")]
    InvalidFieldType(String),

    /// The cleaned record could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

fn fallback_hint(kind: &str) -> String {
    if kind == "raw_audit_goal" {
        format!(" ('{}')", Status::default())
    } else {
        String::new()
    }
}

/// A string did not name a member of one of the closed enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

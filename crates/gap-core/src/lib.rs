//! # gap-core
//!
//! Core types and record cleaners for the GAP compliance API.
//!
//! This crate provides the foundational types shared across all GAP crates:
//! - Closed enums for audit status, icons, custom-field types and field groups
//! - Record shapes for the JSON bodies the server expects
//! - The fixed default status options and goal settings
//! - Cleaners that turn loosely-shaped payloads into those record shapes
//!
//! Cleaners are pure functions of their input: cleaning an already-cleaned
//! record produces the same record again.

pub mod clean;
pub mod enums;
pub mod errors;
pub mod records;

pub use clean::{
    clean_audit_goal_in, clean_audit_goal_out, clean_audit_in, clean_audit_out,
    clean_custom_field, clean_membership, is_dynamic_status,
};
pub use enums::{FieldGroup, FieldType, Icon, Status};
pub use errors::{CleanError, ParseEnumError};
pub use records::{
    AuditGoalRecord, AuditRecord, CustomFieldRecord, GoalSettings, StatusOption,
    DEFAULT_STATUS_OPTIONS, DEFAULT_STATUS_OPTIONS_JSON,
};

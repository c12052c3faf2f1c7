use clap::Subcommand;

use super::JsonInput;

/// Audit commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// List every audit.
    List,
    /// Find an audit by exact title.
    Find { title: String },
    /// Create an audit, or patch the one with the same title.
    Upsert(JsonInput),
    /// Delete an audit.
    Delete { id: String },
}

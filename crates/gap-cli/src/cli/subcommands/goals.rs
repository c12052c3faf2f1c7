use clap::Subcommand;

use super::JsonInput;

/// Audit goal commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GoalCommands {
    /// List every audit goal.
    List,
    /// Get an audit goal by ID.
    Get { id: String },
    /// Find an audit goal by exact title.
    Find { title: String },
    /// Create an audit goal, or patch the one with the same title.
    Upsert(JsonInput),
    /// Delete an audit goal.
    Delete { id: String },
}

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuditCommands, FieldCommands, GoalCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Check configuration and log a welcome line.
    Hello,
    /// List the accounts the credentials can act on.
    Memberships,
    /// Audits.
    Audits {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Audit goals.
    Goals {
        #[command(subcommand)]
        action: GoalCommands,
    },
    /// Custom fields.
    Fields {
        #[command(subcommand)]
        action: FieldCommands,
    },
    /// Map a Statement-of-Applicability CSV export onto audit goals.
    Map(MapArgs),
}

#[derive(Clone, Debug, Args)]
pub struct MapArgs {
    /// CSV file with a header row.
    pub csv: PathBuf,

    /// Audit the mapped goals belong to.
    #[arg(long)]
    pub parent_id: Option<u64>,

    /// Upsert every mapped goal by title instead of printing the bodies.
    #[arg(long)]
    pub push: bool,
}

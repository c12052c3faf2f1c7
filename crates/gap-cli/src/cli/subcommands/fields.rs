use clap::Subcommand;
use gap_core::FieldGroup;

use super::JsonInput;

/// Custom field commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FieldCommands {
    /// List every custom field, flattened out of its group.
    List,
    /// Create one custom field in a group.
    Create {
        /// Owning group, e.g. `work_processes`.
        group: FieldGroup,
        #[command(flatten)]
        input: JsonInput,
    },
    /// Create each field of a JSON array whose name the group lacks.
    Upsert {
        group: FieldGroup,
        #[command(flatten)]
        input: JsonInput,
    },
}

use anyhow::Context;
use gap_config::GapConfig;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::commands::{connect, read_json};
use crate::output::output;

pub fn handle(
    action: &AuditCommands,
    config: &GapConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = connect(config)?;
    match action {
        AuditCommands::List => output(&client.get_audits()?, flags.format),
        AuditCommands::Find { title } => {
            let audit = client
                .get_audit_by_title(title)?
                .with_context(|| format!("no audit titled '{title}'"))?;
            output(&audit, flags.format)
        }
        AuditCommands::Upsert(input) => {
            let outcome = client.upsert_audit(&read_json(input)?)?;
            let created = outcome.was_created();
            output(
                &json!({"created": created, "audit": outcome.into_value()}),
                flags.format,
            )
        }
        AuditCommands::Delete { id } => {
            client.delete_audit(id)?;
            output(&json!({"deleted": id}), flags.format)
        }
    }
}

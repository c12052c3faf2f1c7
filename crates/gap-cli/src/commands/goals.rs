use anyhow::Context;
use gap_config::GapConfig;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GoalCommands;
use crate::commands::{connect, read_json};
use crate::output::output;

pub fn handle(
    action: &GoalCommands,
    config: &GapConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = connect(config)?;
    match action {
        GoalCommands::List => output(&client.get_audit_goals()?, flags.format),
        GoalCommands::Get { id } => output(&client.get_audit_goal(id)?, flags.format),
        GoalCommands::Find { title } => {
            let goal = client
                .get_audit_goal_by_title(title)?
                .with_context(|| format!("no audit goal titled '{title}'"))?;
            output(&goal, flags.format)
        }
        GoalCommands::Upsert(input) => {
            let outcome = client.upsert_audit_goal_by_title(&read_json(input)?)?;
            let created = outcome.was_created();
            output(
                &json!({"created": created, "goal": outcome.into_value()}),
                flags.format,
            )
        }
        GoalCommands::Delete { id } => {
            client.delete_audit_goal(id)?;
            output(&json!({"deleted": id}), flags.format)
        }
    }
}

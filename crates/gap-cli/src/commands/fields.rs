use anyhow::bail;
use gap_config::GapConfig;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FieldCommands;
use crate::commands::{connect, read_json};
use crate::output::output;

pub fn handle(
    action: &FieldCommands,
    config: &GapConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = connect(config)?;
    match action {
        FieldCommands::List => output(&client.get_custom_fields()?, flags.format),
        FieldCommands::Create { group, input } => {
            let created = client.create_custom_field(*group, &read_json(input)?)?;
            output(&created, flags.format)
        }
        FieldCommands::Upsert { group, input } => {
            let raws = match read_json(input)? {
                Value::Array(raws) => raws,
                single @ Value::Object(_) => vec![single],
                other => bail!("expected a field object or an array of fields, got {other}"),
            };
            let created = client.upsert_custom_fields(*group, &raws)?;
            output(&created, flags.format)
        }
    }
}

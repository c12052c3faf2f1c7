use anyhow::{Context, bail};
use gap_config::GapConfig;
use gap_mapper::{FieldMapper, MappedRow, rows_from_path};
use serde_json::{Value, json};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MapArgs;
use crate::commands::connect;
use crate::output::output;

pub fn handle(args: &MapArgs, config: &GapConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = rows_from_path(&args.csv)
        .with_context(|| format!("failed to read {}", args.csv.display()))?;
    let mapper = FieldMapper::audit_goal();
    let parent_id = args.parent_id.map(Value::from);
    let mapped: Vec<MappedRow> = rows.into_iter().map(|row| mapper.map(row)).collect();
    tracing::debug!(rows = mapped.len(), csv = %args.csv.display(), "mapped CSV rows");

    if !args.push {
        let preview: Vec<Value> = mapped
            .into_iter()
            .enumerate()
            .map(|(i, row)| preview_row(i + 1, row, parent_id.clone()))
            .collect();
        return output(&preview, flags.format);
    }

    let client = connect(config)?;
    let mut results = Vec::with_capacity(mapped.len());
    let mut failed = 0_usize;
    for (i, row) in mapped.into_iter().enumerate() {
        let body = row.into_goal_body(parent_id.clone());
        match client.upsert_audit_goal_by_title(&body) {
            Ok(outcome) => {
                let created = outcome.was_created();
                results.push(json!({
                    "row": i + 1,
                    "created": created,
                    "goal": outcome.into_value(),
                }));
            }
            Err(e) => {
                tracing::warn!(row = i + 1, error = %e, "row was not upserted");
                failed += 1;
                results.push(json!({"row": i + 1, "error": e.to_string()}));
            }
        }
    }
    output(&results, flags.format)?;
    if failed > 0 {
        bail!("{failed} of {} rows failed", results.len());
    }
    Ok(())
}

/// One row's goal body plus the columns left for custom fields.
fn preview_row(number: usize, row: MappedRow, parent_id: Option<Value>) -> Value {
    let custom_fields: Vec<String> = row.residual.iter().cloned().collect();
    json!({
        "row": number,
        "goal": row.into_goal_body(parent_id),
        "custom_fields": custom_fields,
    })
}

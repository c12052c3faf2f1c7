pub mod account;
pub mod audits;
pub mod dispatch;
pub mod fields;
pub mod goals;
pub mod map;

use anyhow::{Context, bail};
use gap_client::GapClient;
use gap_config::GapConfig;
use serde_json::Value;

use crate::cli::subcommands::JsonInput;

/// Build a client, refusing to continue with incomplete configuration.
pub fn connect(config: &GapConfig) -> anyhow::Result<GapClient> {
    let client = GapClient::connect(config);
    if let Some(reason) = client.error() {
        bail!("{reason} (set GAP_API__BASE_URL, GAP_API__ACCOUNT_ID and credentials)");
    }
    Ok(client)
}

/// Parse the inline body or the file contents as JSON.
pub fn read_json(input: &JsonInput) -> anyhow::Result<Value> {
    let text = match (&input.body, &input.file) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("either --body or --file is required"),
    };
    serde_json::from_str(&text).context("body is not valid JSON")
}

use gap_config::GapConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::connect;
use crate::output::output;

#[derive(Debug, Serialize)]
struct HelloResponse<'a> {
    api_url: &'a str,
    account_id: &'a str,
}

pub fn hello(config: &GapConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = connect(config)?;
    client.hello();
    output(
        &HelloResponse {
            api_url: client.api_url(),
            account_id: client.account_id(),
        },
        flags.format,
    )
}

pub fn memberships(config: &GapConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = connect(config)?;
    output(&client.get_memberships()?, flags.format)
}

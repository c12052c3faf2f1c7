use std::path::PathBuf;

use clap::Args;

/// A JSON request body, given inline or as a file.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct JsonInput {
    /// Inline JSON body.
    #[arg(long)]
    pub body: Option<String>,

    /// Path to a JSON file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

use gap_config::GapConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: Commands,
    config: &GapConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Hello => commands::account::hello(config, flags),
        Commands::Memberships => commands::account::memberships(config, flags),
        Commands::Audits { action } => commands::audits::handle(&action, config, flags),
        Commands::Goals { action } => commands::goals::handle(&action, config, flags),
        Commands::Fields { action } => commands::fields::handle(&action, config, flags),
        Commands::Map(args) => commands::map::handle(&args, config, flags),
    }
}

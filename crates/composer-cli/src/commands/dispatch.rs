use composer_config::ComposerConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: Commands,
    config: &ComposerConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Apply(args) => commands::apply::handle(&args, config, flags),
        Commands::Extract(args) => commands::extract::handle(&args, config, flags),
        Commands::Upgrade(args) => commands::upgrade::handle(&args, flags),
        Commands::Refs(args) => commands::refs::handle(&args, config, flags),
    }
}

//! Configuration inspection commands.

use hostsync_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config::config_path(global).display());
            Ok(())
        }

        ConfigCommand::Show => {
            let loaded = config::load(global)?;
            output::print_output(&config::redacted(&loaded).to_yaml(), global.quiet);
            Ok(())
        }

        ConfigCommand::Validate { path } => {
            let path = path.unwrap_or_else(|| config::config_path(global));
            Config::load(&path)?;
            if !global.quiet {
                println!("{}: OK", path.display());
            }
            Ok(())
        }
    }
}

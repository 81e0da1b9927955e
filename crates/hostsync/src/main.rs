mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hostsync_config::LogLevel;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Filter precedence: `RUST_LOG` > `-v` count > `logging.level` from the
/// configuration document.
fn init_tracing(verbosity: u8, config_level: Option<LogLevel>) {
    let filter = match verbosity {
        0 => config_level.map_or("warn", LogLevel::as_filter),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hostsync", &mut std::io::stdout());
            Ok(())
        }

        // Config commands resolve their own document
        Command::Config(args) => {
            init_tracing(cli.global.verbose, None);
            commands::config_cmd::handle(args, &cli.global)
        }

        // Pipeline commands load the config first so the document's
        // logging level can seed the filter.
        Command::Sync(args) => {
            let loaded = config::load(&cli.global)?;
            init_tracing(cli.global.verbose, Some(loaded.logging.level));
            commands::sync::handle(args, &loaded, &cli.global).await
        }

        Command::Preview(args) => {
            let loaded = config::load(&cli.global)?;
            init_tracing(cli.global.verbose, Some(loaded.logging.level));
            commands::preview::handle(args, &loaded, &cli.global).await
        }

        Command::Script(args) => {
            let loaded = config::load(&cli.global)?;
            init_tracing(cli.global.verbose, Some(loaded.logging.level));
            commands::script::handle(args, &loaded, &cli.global).await
        }
    }
}

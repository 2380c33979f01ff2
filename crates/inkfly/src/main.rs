mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use inkfly_core::Studio;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
    std::process::exit(error::exit_code::SUCCESS);
}

/// The `-v` ladder maps to warn, info, debug, trace. `RUST_LOG` wins
/// when set.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need credentials
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Completions write to stdout and need no credentials
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "inkfly", &mut std::io::stdout());
            Ok(())
        }

        // All other commands sign requests against the runtime API
        cmd => {
            let studio = build_studio(&cli.global)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &studio, &cli.global).await
        }
    }
}

/// Build a `Studio` from the config file, profile, and CLI overrides.
fn build_studio(global: &cli::GlobalOpts) -> Result<Studio, CliError> {
    let cfg = config::load_config_or_default();
    let (profile_name, profile) = config::active_profile(global, &cfg)?;

    let credentials = config::resolve_credentials(global, profile, &profile_name)?;
    let studio_config = config::studio_config(global, profile, &cfg.defaults);

    Ok(Studio::new(credentials, &studio_config)?)
}

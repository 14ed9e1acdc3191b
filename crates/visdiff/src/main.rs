mod cli;
mod commands;
mod config;
mod report;
mod store;

use clap::Parser;
use config::{CliOverrides, ResolvedRunConfig};
use store::Store;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("visdiff=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let store = Store::new(config::CONFIG_DIR);

    match cli.command {
        cli::Command::Init { force } => {
            commands::init(&store, force)?;
        }
        cli::Command::Compare {
            paths,
            train,
            settings,
        } => {
            let config = ResolvedRunConfig::new(store.root(), CliOverrides { settings, train })?;
            let code = commands::compare(&paths, config)?;
            std::process::exit(code);
        }
        cli::Command::Test {
            filter,
            train,
            json,
            settings,
        } => {
            let config = ResolvedRunConfig::new(store.root(), CliOverrides { settings, train })?;
            let code = commands::test(&store, config, filter.as_deref(), json)?;
            std::process::exit(code);
        }
        cli::Command::Approve {
            filter,
            new,
            failed,
            all,
        } => {
            commands::approve(&store, filter.as_deref(), new, failed, all)?;
        }
    }

    Ok(())
}

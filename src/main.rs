use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod gallery;
mod services;

use cli::Cli;
use commands::{handle_info_command, handle_serve_command};
use services::config::Settings;

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let settings = Settings::load(cli.config.as_deref())?;

    if handle_info_command(&cli, &settings)? {
        return Ok(());
    }
    handle_serve_command(&cli, &settings)?;
    Ok(())
}

//! doclink CLI
//!
//! Mirrors the documents of a Paperless server into a browsable folder tree
//! made of hard links to the server's media files.

mod cli;
mod commands;
mod error;
mod settings;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::Result;
use settings::Settings;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the level chosen by `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::resolve(cli)?;
    tracing::debug!(
        api_base_url = %settings.api_base_url,
        src_dir = %settings.src_dir.display(),
        dst_dir = %settings.dst_dir.display(),
        selection = ?settings.selection,
        dry_run = settings.dry_run,
        "Resolved settings"
    );

    commands::run_link(&settings, cli.json)?;
    Ok(())
}

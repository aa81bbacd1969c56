use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use giftbox_cli::commands::{self, Command};
use giftbox_cli::config::AppConfig;
use giftbox_cli::{app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gift box configurator.
///
/// Builds and prices gift boxes from the catalog and keeps a collection of
/// saved designs in the configured store.
#[derive(Debug, Parser)]
#[command(name = "giftbox", version)]
struct Cli {
    /// Configuration file. Defaults to `giftbox.toml` when present.
    #[arg(long, env = "GIFTBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Design store backend (`sqlite` or `memory`).
    #[arg(long, env = "GIFTBOX_BACKEND")]
    backend: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `giftbox.db`) or `:memory:`.
    #[arg(long, env = "GIFTBOX_DB")]
    db: Option<String>,

    /// Catalog CSV to use instead of the bundled catalog.
    #[arg(long, env = "GIFTBOX_CATALOG")]
    catalog: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `giftbox_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Keep log output off the terminal.
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    if let Command::Backends = cli.command {
        print!("{}", commands::backends());
        return Ok(());
    }

    let config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.backend, cli.db, cli.catalog);

    debug!("connecting to {} backend", config.store.backend);
    let catalog = app::load_catalog(&config.catalog)?;
    let mut studio = app::open_studio(&config).await?;

    let output = commands::run(cli.command, &mut studio, &catalog).await?;
    print!("{output}");

    Ok(())
}

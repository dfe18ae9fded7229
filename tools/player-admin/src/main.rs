//! Player Admin entry point

use anyhow::{Context, Result};
use clap::Parser;
use persistence::open_store;
use tracing::info;

use player_admin::{execute, initialize_logging, load_config, Cli};

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = cli.apply_overrides(config);

    initialize_logging(&config.logging)?;

    info!(
        "player-admin v{} using {} store at {:?}",
        env!("CARGO_PKG_VERSION"),
        config.store.format,
        config.store.path
    );

    let store = open_store(&config.store).context("Failed to open record store")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, store.as_ref(), &mut out)
}

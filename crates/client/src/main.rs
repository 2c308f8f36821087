//! Battle client binary.
//!
//! Fights the configured creature with the stored character and prints the
//! narrated log.
//!
//! # Examples
//!
//! ```bash
//! # Fight the troll with a fixed seed, ambushed
//! BATTLE_CREATURE=forest_troll BATTLE_SEED=42 BATTLE_SURPRISED=1 cargo run -p battle-client
//!
//! # Verbose engine logs into ./logs/battle.log
//! RUST_LOG=battle_core=trace BATTLE_LOG_DIR=logs cargo run -p battle-client
//! ```

use std::io;

use anyhow::Result;
use battle_client::{ClientConfig, app, log_failure, setup_logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting battle client");
    tracing::debug!(?config, "Client configuration");

    let result = app::run(&config, &mut io::stdout().lock()).inspect_err(log_failure)?;

    tracing::info!(%result, "Battle client finished");
    Ok(())
}

//! Logging setup
//!
//! Log lines go to stdout. `RUST_LOG` overrides the level chosen with the
//! `-w`, `-i` and `-v` flags.

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(level: LevelFilter) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("adopipe={level},adopipe_client={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .try_init()
        .context("Failed to initialize logging")
}

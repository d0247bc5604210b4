//! Tracing setup for binaries that embed the token pipeline.

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Install `color-eyre` and a global subscriber filtered by `RUST_LOG`
/// (default `info`). Fails if a global subscriber is already set.
pub fn init_tracing() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}

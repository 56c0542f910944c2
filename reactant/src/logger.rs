//! Log output for the host.
//!
//! Every crate logs through the `log` facade; this routes those records
//! into a `tracing` subscriber.

use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Fails if one is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    LogTracer::init()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

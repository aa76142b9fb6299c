//! Telemetry initialization: tracing with an env-filtered fmt subscriber.
//!
//! Log verbosity is controlled via the standard `RUST_LOG` environment
//! variable and defaults to `info`.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize tracing for the process.
///
/// Safe to call once at startup; calling again returns an error from the
/// subscriber registry, which we surface to the caller.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}

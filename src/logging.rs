//! Structured logging setup
//!
//! Log lines go to stderr so they never interleave with the results
//! table on stdout. `RUST_LOG` overrides the default `warn` level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let init_result = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();

    if let Err(e) = init_result {
        // Another subscriber (usually a test harness) is already installed.
        if e.to_string().contains("already been set") {
            return Ok(());
        }
        return Err(Box::new(e));
    }

    tracing::debug!("Logging initialized");
    Ok(())
}

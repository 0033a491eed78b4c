//! Logging initialization.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins over `log_level`; `verbose` forces debug output.
pub fn init_telemetry(log_level: &str, verbose: bool) -> anyhow::Result<()> {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(log_level, verbose, env_directives.as_deref())?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Pick the log filter. Unparsable `env_directives` fall back to `log_level`.
pub fn build_filter(
    log_level: &str,
    verbose: bool,
    env_directives: Option<&str>,
) -> anyhow::Result<EnvFilter> {
    if verbose {
        return Ok(EnvFilter::try_new("debug")?);
    }
    if let Some(filter) = env_directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(log_level)?)
}

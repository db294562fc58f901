use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout only carries markup. `RUST_LOG` takes
/// precedence; otherwise the level is `info`, or `debug` with `--verbose`.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
    Ok(())
}

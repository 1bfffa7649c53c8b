//! Tracing subscriber setup

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter directive when `RUST_LOG` is unset
fn default_directive(verbose: bool, dry_run: bool) -> &'static str {
    if verbose {
        "debug"
    } else if dry_run {
        "info"
    } else {
        "warn"
    }
}

/// Install a compact stderr subscriber filtered by `RUST_LOG`
///
/// Dry runs log at info level so `[DRY RUN] Would ...` lines are shown.
pub fn init(verbose: bool, dry_run: bool) -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose, dry_run)))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

//! `tracing` subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Filter from `RUST_LOG`, falling back to the verbosity flags
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.filter_directive()))
}

/// Install the global subscriber; logs go to stderr.
///
/// A second call is a no-op.
pub fn init(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);
    let _ = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.with_ansi(config.color.should_color()).try_init()
    };
}

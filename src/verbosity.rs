// Logging setup: maps the CLI verbosity level onto a tracing filter
use tracing_subscriber::EnvFilter;

/// 0 = cycle summaries, 1 = per-fleet decisions, 2 = every API call
pub fn filter_for_level(level: u8) -> &'static str {
    match level {
        0 => "imperium_cc=info",
        1 => "imperium_cc=debug",
        _ => "imperium_cc=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the CLI level when set.
pub fn init_logging(level: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_level(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

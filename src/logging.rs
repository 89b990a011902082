//! Diagnostic logging to stderr via `tracing`.

use std::sync::Once;

use tracing::Level;

use crate::config::schema::LoggingConfig;

static INIT: Once = Once::new();

/// Install the global subscriber at the configured level. Later calls are
/// no-ops.
pub fn init(config: &LoggingConfig) {
    let level = parse_level(&config.level);
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Parse a level name; anything unrecognised is `info`.
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

use std::str::FromStr;

use tracing::Level;

pub const LOG_LEVEL_ENV: &str = "SMC_LOG";

pub fn init_logging() {
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| Level::from_str(value.trim()).ok())
        .unwrap_or(Level::INFO);
    init_logging_with_level(level);
}

pub fn init_logging_with_level(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

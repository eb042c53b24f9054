//! Tracing setup for yojanactl
//!
//! Logs go to stderr so stdout stays clean for messages and JSON.
//! Filter priority: $YOJANA_LOG, then -v flags, then the config level.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "YOJANA_LOG";

/// Filter directive for the given verbosity
pub fn level_for(config_level: &str, verbose: u8) -> String {
    match verbose {
        0 => config_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(config_level: &str, verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::try_new(level_for(config_level, verbose))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Structured logging setup on top of `tracing`.
//!
//! Filter priority: `GITFS_LOG`, then the `-v` count, then `[logging] level`.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "GITFS_LOG";

/// Maps a repeated `-v` flag to a level name.
pub fn level_for_verbosity(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn build_filter(config: &LoggingConfig, verbosity: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    let level = level_for_verbosity(verbosity).unwrap_or(config.level.as_str());
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber, writing to stderr.
///
/// Calling this twice is harmless; the second call keeps the first subscriber.
pub fn init_logging(config: &LoggingConfig, verbosity: u8) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config, verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        tracing::debug!("keeping existing subscriber: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), None);
        assert_eq!(level_for_verbosity(1), Some("info"));
        assert_eq!(level_for_verbosity(2), Some("debug"));
        assert_eq!(level_for_verbosity(9), Some("trace"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        init_logging(&config, 0);
        init_logging(&config, 2);
    }
}

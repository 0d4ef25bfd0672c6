//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install a `tracing` fmt subscriber
///
/// `RUST_LOG` wins over the configured level. Returns `false` if a global
/// subscriber was already installed, which leaves that one in place.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let config = LogConfig::new("debug");
        init_logging(&config);
        assert!(!init_logging(&config));
    }
}

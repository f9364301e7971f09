//! Sets up `tracing_subscriber` for the CLI.
//!
//! `RUST_LOG` takes precedence over the configured level, e.g.
//! ```bash
//! RUST_LOG=travelmap=debug travelmap route "New York" Paris
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` if set, otherwise the configured level.
/// `verbose` forces debug output for this crate.
#[must_use]
pub fn build_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("warn,travelmap=debug");
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,travelmap={}", config.level)))
}

/// Initialises logging to stderr. Calling this more than once is a no-op.
pub fn initialize_logging(config: &LoggingConfig, verbose: bool) {
    let filter = build_filter(config, verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "compact" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_enables_debug() {
        let filter = build_filter(&LoggingConfig::default(), true);
        assert!(filter.to_string().contains("travelmap=debug"));
    }

    #[test]
    fn test_initialize_twice_is_harmless() {
        let config = LoggingConfig::default();
        initialize_logging(&config, false);
        initialize_logging(&config, false);
    }
}

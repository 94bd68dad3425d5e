//! Logging for the trade aggregator
//!
//! Installs the process-wide `tracing` subscriber. Library crates only emit
//! events; this is the single place where a subscriber is set.

use aggregator_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. Falls back to
/// `info` when neither parses.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(&config.log_filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt_layer).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_used_without_rust_log() {
        temp_env::with_var_unset("RUST_LOG", || {
            let filter = build_filter("aggregator_client=debug");
            assert_eq!(filter.to_string(), "aggregator_client=debug");
        });
    }

    #[test]
    fn rust_log_overrides_configured_filter() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            assert_eq!(build_filter("debug").to_string(), "warn");
        });
    }

    #[test]
    fn invalid_filter_falls_back_to_info() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert_eq!(build_filter("aggregator=loud").to_string(), "info");
        });
    }

    #[test]
    fn second_init_is_an_error() {
        let config = TelemetryConfig::default();

        let _ = init(&config);

        assert!(init(&config).is_err());
    }
}

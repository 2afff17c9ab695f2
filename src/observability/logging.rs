//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr so stdout carries only the summary
//! - `RUST_LOG` wins over the configured level

use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used before the config file has been read.
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("nft_deploy={level},alloy=warn,reqwest=warn")
}

/// Build a stderr subscriber at `level`.
///
/// Startup runs under one of these as a scoped default so config loading is
/// logged before the configured level is known.
pub fn subscriber(level: &str) -> impl Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());

    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    )
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(level: &str) {
    let _ = subscriber(level).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let filter = default_filter("debug");
        assert!(filter.starts_with("nft_deploy=debug"));
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_scoped_subscriber_honours_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let debug = tracing::subscriber::with_default(subscriber("debug"), || {
            tracing::enabled!(tracing::Level::DEBUG)
        });
        let info = tracing::subscriber::with_default(subscriber("info"), || {
            tracing::enabled!(tracing::Level::DEBUG)
        });
        assert!(debug);
        assert!(!info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("info");
        init("debug");
    }
}

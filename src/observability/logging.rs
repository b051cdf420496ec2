//! Structured logging.
//!
//! `RUST_LOG` wins when set. Otherwise the configured level applies, and
//! `PROXY_LOG` raises this crate to debug for tracing proxied traffic.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Environment flag enabling verbose proxy logging.
pub const PROXY_LOG_ENV: &str = "PROXY_LOG";

/// Default filter directive when `RUST_LOG` is absent.
pub fn default_directive(config: &ObservabilityConfig, proxy_log: bool) -> String {
    if proxy_log {
        "theme_dev_proxy=debug,tower_http=debug".to_string()
    } else {
        format!("theme_dev_proxy={},tower_http=warn", config.log_level)
    }
}

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let proxy_log = std::env::var_os(PROXY_LOG_ENV).is_some();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(config, proxy_log).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

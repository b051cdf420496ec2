//! Configuration validation.
//!
//! Serde handles syntax; this module checks meaning and produces the
//! immutable [`UpstreamConfig`] the proxies are built from. All errors are
//! reported, not just the first.

use url::Url;

use crate::config::schema::DevProxyConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validated upstream settings, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Scheme, host and optional path prefix, without a trailing slash.
    pub origin: String,
    /// Value for the forwarded `Host` header (`host[:port]`).
    pub host: String,
    pub blank_mode: bool,
}

impl UpstreamConfig {
    /// Parse and normalize a source URL.
    pub fn parse(source_url: &str, blank_mode: bool) -> Result<Self, ValidationError> {
        let invalid = |message: String| ValidationError {
            field: "sourceUrl",
            message,
        };

        if source_url.trim().is_empty() {
            return Err(invalid("is required".to_string()));
        }
        let url = Url::parse(source_url.trim())
            .map_err(|e| invalid(format!("'{}' is not an absolute URL: {}", source_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        let host = match url.host_str() {
            Some(h) => h.to_string(),
            None => return Err(invalid(format!("'{}' has no host", source_url))),
        };
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        };

        let mut origin = url.to_string();
        // Query and fragment make no sense on an origin.
        if let Some(idx) = origin.find(['?', '#']) {
            origin.truncate(idx);
        }
        let origin = origin.trim_end_matches('/').to_string();

        Ok(Self {
            origin,
            host,
            blank_mode,
        })
    }

    /// Absolute upstream URL for a request's path and query.
    pub fn target(&self, path_and_query: &str) -> String {
        format!("{}{}", self.origin, path_and_query)
    }
}

/// Check a loaded config and derive its [`UpstreamConfig`].
pub fn validate_config(config: &DevProxyConfig) -> Result<UpstreamConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let upstream = match UpstreamConfig::parse(&config.source_url, config.blank_mode) {
        Ok(u) => Some(u),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if !config.server.api_prefix.starts_with('/') || config.server.api_prefix.len() < 2 {
        errors.push(ValidationError {
            field: "server.apiPrefix",
            message: format!("'{}' must be a path starting with '/'", config.server.api_prefix),
        });
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.connectSecs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.upstreamSecs",
            message: "must be greater than zero".to_string(),
        });
    }

    match upstream {
        Some(u) if errors.is_empty() => Ok(u),
        _ => Err(errors),
    }
}

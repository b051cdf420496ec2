//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration structure for the dev proxy.
//! Top-level keys keep the camelCase names used by existing `config.json`
//! files (`sourceUrl`, `blankMode`), so a theme project can reuse its file.

use serde::{Deserialize, Serialize};

/// Root configuration as read from disk.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct DevProxyConfig {
    /// Origin of the remote platform (e.g. "https://shop.example.com/").
    pub source_url: String,

    /// Suppress the upstream's own CDN stylesheet.
    pub blank_mode: bool,

    /// Local listener and dispatch settings.
    pub server: ServerConfig,

    /// Where local sources live and how injected tags point at them.
    pub assets: AssetConfig,

    /// Strip-rule parameters.
    pub rewrite: RewriteConfig,

    /// Upstream timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener and routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3010").
    pub bind_address: String,

    /// Directory served for requests neither proxy handles.
    pub static_root: String,

    /// Requests under this prefix are forwarded verbatim.
    pub api_prefix: String,

    /// Dev-tooling paths that must never be treated as documents.
    pub tooling_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3010".to_string(),
            static_root: ".".to_string(),
            api_prefix: "/action".to_string(),
            tooling_prefix: "/@".to_string(),
        }
    }
}

/// Local asset layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetConfig {
    /// Directory scanned for style entries.
    pub styles_dir: String,

    /// Directory scanned for script entries.
    pub scripts_dir: String,

    /// URL prefix of injected stylesheet links.
    pub style_href_prefix: String,

    /// Source extension the local dev server compiles styles from.
    pub style_source_extension: String,

    /// URL prefix of injected script tags.
    pub script_src_prefix: String,

    /// Dev-client scripts injected before `</head>`.
    pub client_scripts: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            styles_dir: "src/scss".to_string(),
            scripts_dir: "src/js".to_string(),
            style_href_prefix: "/src/scss/".to_string(),
            style_source_extension: "scss".to_string(),
            script_src_prefix: "/src/js/".to_string(),
            client_scripts: vec!["/@vite/client".to_string()],
        }
    }
}

/// Parameters of the strip rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteConfig {
    /// Host prefix of the platform's production stylesheet CDN.
    pub cdn_prefix: String,

    /// Path segment identifying published user content.
    pub published_segment: String,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            cdn_prefix: "https://cdn.myshoptet.com/prj/".to_string(),
            published_segment: "/user/documents/".to_string(),
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for the upstream to answer, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            upstream_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

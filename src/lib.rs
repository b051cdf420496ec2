//! Theme development reverse proxy.
//!
//! Serves a remote platform's pages through a local origin while swapping
//! the platform's published theme assets for the developer's local ones.

pub mod codec;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod manifest;
pub mod observability;
pub mod resilience;
pub mod rewrite;
pub mod routing;

pub use config::{DevProxyConfig, UpstreamConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use manifest::BuildManifest;
pub use rewrite::RewriteRuleSet;

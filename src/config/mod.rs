//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.json / config.toml
//!     → loader.rs (parse & deserialize, BLANK=1 override)
//!     → validation.rs (semantic checks, URL normalization)
//!     → UpstreamConfig (validated, immutable)
//!     → shared via Arc with both proxies
//! ```
//!
//! # Design Decisions
//! - Loaded once at start; never reloaded while serving
//! - All fields except `sourceUrl` have defaults
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, ConfigError};
pub use schema::{
    AssetConfig, DevProxyConfig, ObservabilityConfig, RewriteConfig, ServerConfig, TimeoutConfig,
};
pub use validation::{validate_config, UpstreamConfig, ValidationError};

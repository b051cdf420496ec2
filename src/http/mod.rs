//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch middleware)
//!     → routing (classify: api / document / static)
//!     → api_proxy.rs (stream through)   | document.rs (fetch, decode, rewrite)
//!     → request.rs (Host re-targeting, hop-by-hop removal)
//!     → response.rs (header copy, Set-Cookie, redirects)
//!     → Send to client
//! ```

pub mod api_proxy;
pub mod document;
pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ProxyError;
pub use server::{AppState, HttpServer};

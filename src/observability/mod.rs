//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured log events, per-request spans)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing
//! - Each request span carries a generated request id
//! - Metrics exporter is opt-in

pub mod logging;
pub mod metrics;

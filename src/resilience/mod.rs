//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce deadline on the upstream answer)
//!     → On failure: gateway error to the client, no retry
//! ```
//!
//! # Design Decisions
//! - Every upstream call has a deadline
//! - No retries: a dev proxy surfaces failures immediately

pub mod timeouts;

pub use timeouts::with_deadline;

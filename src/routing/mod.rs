//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (classification)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: ApiProxy | DocumentInjector | PassThrough
//! ```
//!
//! # Design Decisions
//! - Matchers compiled at startup, immutable at runtime
//! - Deterministic: same input always yields the same route
//! - API prefix checked first

pub mod matcher;
pub mod router;

pub use router::{RequestRouter, RouteKind};

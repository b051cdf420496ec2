//! HTML rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     BuildManifest + blank mode + asset layout
//!     → rules.rs (compile strip patterns, render injected tags)
//!     → RewriteRuleSet (immutable, shared via Arc)
//!
//! Per document:
//!     decoded HTML text
//!     → document.rs (strip CDN, inject, strip published assets)
//!     → rewritten HTML text
//! ```
//!
//! # Design Decisions
//! - Pattern based, operating on the full text rather than a DOM
//! - Strips and injections target disjoint tag classes; only the fixed
//!   ordering relates them

pub mod document;
pub mod rules;

pub use rules::{LocalAssetInjection, RewriteRuleSet};

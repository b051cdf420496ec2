//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Discover manifest → Compile rules → Listen
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;

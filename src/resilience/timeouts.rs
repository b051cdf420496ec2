//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound the time spent waiting on the upstream
//! - Cancel the pending upstream call when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from connection errors
//! - Timed-out requests surface as gateway failures

use std::future::Future;
use std::time::Duration;

use crate::http::error::ProxyError;

/// Run `fut` under `deadline`; the future is dropped on expiry.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, ProxyError>
where
    F: Future<Output = Result<T, ProxyError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProxyError::UpstreamTimeout(deadline.as_secs())),
    }
}

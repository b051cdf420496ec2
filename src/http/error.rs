//! Per-request proxy failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors that end a single proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Connection refused, reset, or failed mid-response.
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// Upstream did not answer before the deadline.
    #[error("upstream timed out after {0} seconds")]
    UpstreamTimeout(u64),

    /// Target URL or header set could not be built.
    #[error("invalid upstream request: {0}")]
    RequestConstruction(String),

    /// WebSocket and other protocol upgrades are not proxied.
    #[error("protocol upgrade is not supported on this path")]
    UpgradeRefused,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::UpstreamUnreachable(_) | ProxyError::UpstreamTimeout(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::RequestConstruction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::UpgradeRefused => StatusCode::NOT_IMPLEMENTED,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ProxyError::RequestConstruction(e.to_string())
        } else {
            ProxyError::UpstreamUnreachable(e.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), format!("Proxy error: {}", self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::UpstreamUnreachable("refused".into()).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(ProxyError::UpstreamTimeout(30).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ProxyError::RequestConstruction("bad uri".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ProxyError::UpgradeRefused.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn test_into_response_carries_status() {
        let res = ProxyError::UpstreamTimeout(5).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }
}

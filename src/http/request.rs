//! Request preparation for the upstream.
//!
//! # Responsibilities
//! - Re-target `Host` at the upstream
//! - Strip hop-by-hop headers, including those named by `Connection`, and
//!   keep everything else byte for byte
//! - Tag each inbound request with a request id for tracing
//!
//! # Design Decisions
//! - The request id lives only in the tracing span; forwarded headers are
//!   never touched beyond `Host` and hop-by-hop removal

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Request};
use tracing::Span;
use uuid::Uuid;

use crate::http::error::ProxyError;

/// Headers that describe a single connection and are never forwarded.
pub const HOP_BY_HOP: [header::HeaderName; 5] = [
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

pub fn is_hop_by_hop(name: &header::HeaderName) -> bool {
    HOP_BY_HOP.contains(name) || name == "keep-alive" || name == "proxy-connection"
}

/// Header names listed as connection options in `Connection`.
pub fn connection_options(headers: &HeaderMap) -> Vec<HeaderName> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect()
}

/// True when `name` is hop-by-hop or listed in the message's connection `options`.
pub fn is_connection_scoped(name: &HeaderName, options: &[HeaderName]) -> bool {
    is_hop_by_hop(name) || options.contains(name)
}

/// True when the client asks to switch protocols (e.g. WebSocket).
pub fn is_upgrade_request(headers: &HeaderMap) -> bool {
    headers.contains_key(header::UPGRADE)
}

/// True when the inbound request carries a body.
pub fn has_body(headers: &HeaderMap) -> bool {
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|len| len > 0)
        .unwrap_or(false)
}

/// Copy inbound headers for the upstream, pointing `Host` at `upstream_host`.
pub fn forward_headers(inbound: &HeaderMap, upstream_host: &str) -> Result<HeaderMap, ProxyError> {
    let options = connection_options(inbound);
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound.iter() {
        if name == header::HOST || is_connection_scoped(name, &options) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    let host = HeaderValue::from_str(upstream_host)
        .map_err(|e| ProxyError::RequestConstruction(format!("invalid host '{}': {}", upstream_host, e)))?;
    headers.insert(header::HOST, host);
    Ok(headers)
}

/// Span for one inbound request; used by the trace layer.
pub fn request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        uri = %request.uri(),
    )
}

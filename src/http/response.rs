//! Response transformation for the client.
//!
//! # Responsibilities
//! - Copy upstream headers minus hop-by-hop ones
//! - Re-propagate every `Set-Cookie` value explicitly
//! - Keep redirects pointing at the local proxy
//!
//! # Design Decisions
//! - Multiple `Set-Cookie` headers are appended, never folded

use axum::http::{header, HeaderMap, HeaderValue};

use crate::http::request::{connection_options, is_connection_scoped};

/// Copy upstream response headers, leaving out hop-by-hop and `Set-Cookie`.
pub fn copy_response_headers(upstream: &HeaderMap, out: &mut HeaderMap) {
    let options = connection_options(upstream);
    for (name, value) in upstream.iter() {
        if is_connection_scoped(name, &options) || name == header::SET_COOKIE {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
}

/// Append every upstream `Set-Cookie` value to `out`.
pub fn propagate_set_cookie(upstream: &HeaderMap, out: &mut HeaderMap) {
    for value in upstream.get_all(header::SET_COOKIE) {
        out.append(header::SET_COOKIE, value.clone());
    }
}

/// Make an absolute `Location` on the upstream origin origin-relative.
pub fn rewrite_location(location: &HeaderValue, origin: &str) -> HeaderValue {
    let Ok(text) = location.to_str() else {
        return location.clone();
    };
    match text.strip_prefix(origin) {
        Some(rest) if rest.is_empty() => HeaderValue::from_static("/"),
        Some(rest) if rest.starts_with('/') || rest.starts_with('?') => {
            let rest = if rest.starts_with('?') { format!("/{}", rest) } else { rest.to_string() };
            HeaderValue::from_str(&rest).unwrap_or_else(|_| location.clone())
        }
        _ => location.clone(),
    }
}

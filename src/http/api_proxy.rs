//! Verbatim forwarding for the reserved API prefix.
//!
//! Method, headers (except `Host` and hop-by-hop ones) and body are passed to
//! the upstream unchanged. The request body is streamed, never buffered, and
//! so is the response body on the way back.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::TryStreamExt;

use crate::http::error::ProxyError;
use crate::http::request::{forward_headers, has_body, is_upgrade_request};
use crate::http::response::{copy_response_headers, propagate_set_cookie};
use crate::http::server::AppState;
use crate::resilience::with_deadline;

/// Forward one API request and stream the upstream answer back.
pub async fn forward(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    if is_upgrade_request(&parts.headers) {
        return Err(ProxyError::UpgradeRefused);
    }

    let path_and_query = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let target = reqwest::Url::parse(&state.upstream.target(path_and_query))
        .map_err(|e| ProxyError::RequestConstruction(e.to_string()))?;
    let headers = forward_headers(&parts.headers, &state.upstream.host)?;

    tracing::debug!(method = %parts.method, target = %target, "Forwarding API request");

    let mut builder = state
        .client
        .request(parts.method.clone(), target)
        .headers(headers);
    if has_body(&parts.headers) {
        builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }
    let upstream_request = builder.build()?;

    // Only the wait for response headers is bounded; long bodies keep streaming.
    let upstream = with_deadline(state.upstream_timeout, async {
        Ok::<_, ProxyError>(state.client.execute(upstream_request).await?)
    })
    .await?;

    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();
    let stream = upstream.bytes_stream().inspect_err(|e| {
        tracing::warn!(error = %e, "Upstream stream aborted");
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    copy_response_headers(&upstream_headers, response.headers_mut());
    propagate_set_cookie(&upstream_headers, response.headers_mut());
    Ok(response)
}

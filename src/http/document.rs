//! Document injector.
//!
//! Each request walks `FETCHING → DECODING → REWRITING → RESPONDING`; a
//! failure while fetching ends it with a gateway error. Bodies are buffered
//! here since HTML documents are bounded in size.

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::Response;

use crate::codec;
use crate::http::error::ProxyError;
use crate::http::request::forward_headers;
use crate::http::response::{propagate_set_cookie, rewrite_location};
use crate::http::server::AppState;
use crate::resilience::with_deadline;

/// Upstream answer collected during FETCHING.
#[derive(Debug)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProxiedResponse {
    pub fn content_encoding(&self) -> Option<&str> {
        self.headers
            .get(header::CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
    }
}

/// Fetch the upstream page for this request and return it rewritten.
pub async fn inject(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let (parts, _body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let target = reqwest::Url::parse(&state.upstream.target(path_and_query))
        .map_err(|e| ProxyError::RequestConstruction(e.to_string()))?;
    let mut headers = forward_headers(&parts.headers, &state.upstream.host)?;
    // The inbound body is dropped, so no length may be announced for it.
    headers.remove(header::CONTENT_LENGTH);
    let upstream_request = state.client.get(target.clone()).headers(headers).build()?;

    tracing::debug!(target = %target, "Fetching document");
    let proxied = with_deadline(state.upstream_timeout, async {
        let upstream = state.client.execute(upstream_request).await?;
        let status = upstream.status();
        let headers = upstream.headers().clone();
        let body = upstream.bytes().await?;
        Ok::<_, ProxyError>(ProxiedResponse {
            status,
            headers,
            body,
        })
    })
    .await?;

    let decoded = codec::decode_body(proxied.content_encoding(), &proxied.body);
    let html = String::from_utf8_lossy(&decoded);
    let rewritten = state.rules.rewrite(&html);

    tracing::debug!(
        status = %proxied.status,
        upstream_bytes = proxied.body.len(),
        rewritten_bytes = rewritten.len(),
        "Document rewritten"
    );

    Ok(respond(&proxied, rewritten, &state.upstream.origin))
}

fn respond(proxied: &ProxiedResponse, html: String, origin: &str) -> Response {
    let mut response = Response::new(Body::from(html));
    *response.status_mut() = proxied.status;

    let headers = response.headers_mut();
    propagate_set_cookie(&proxied.headers, headers);
    if proxied.status.is_redirection() {
        if let Some(location) = proxied.headers.get(header::LOCATION) {
            headers.insert(header::LOCATION, rewrite_location(location, origin));
        }
    }
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respond_sets_html_and_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, HeaderValue::from_static("s=1"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("t=2"));
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("999"));
        let proxied = ProxiedResponse {
            status: StatusCode::NOT_FOUND,
            headers,
            body: Bytes::new(),
        };

        let res = respond(&proxied, "<p>x</p>".into(), "https://shop.example.com");
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers().get_all(header::SET_COOKIE).iter().count(), 2);
        assert!(res.headers().get(header::CONTENT_ENCODING).is_none());
        assert!(res.headers().get(header::CONTENT_LENGTH).is_none());
        assert!(res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }

    #[test]
    fn test_respond_keeps_redirect_local() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::LOCATION,
            HeaderValue::from_static("https://shop.example.com/login/"),
        );
        let proxied = ProxiedResponse {
            status: StatusCode::FOUND,
            headers,
            body: Bytes::new(),
        };
        let res = respond(&proxied, String::new(), "https://shop.example.com");
        assert_eq!(res.headers()[header::LOCATION], "/login/");
    }
}

//! Request classification.
//!
//! # Responsibilities
//! - Decide which proxy, if any, handles a request
//! - Run before static file resolution so document routes never 404 locally
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Pure function of method and path; no side effects
//! - API prefix wins regardless of method

use axum::http::{Method, Request};

use crate::config::ServerConfig;
use crate::routing::matcher::{DocumentRouteMatcher, Matcher, PathPrefixMatcher};

/// Where a request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// Forwarded verbatim to the upstream.
    ApiProxy,
    /// Fetched upstream, rewritten, and returned as HTML.
    DocumentInjector,
    /// Left to the local static/dev server.
    PassThrough,
}

impl RouteKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::ApiProxy => "api",
            RouteKind::DocumentInjector => "document",
            RouteKind::PassThrough => "static",
        }
    }
}

/// Classifies inbound requests.
#[derive(Debug, Clone)]
pub struct RequestRouter {
    api: PathPrefixMatcher,
    document: DocumentRouteMatcher,
}

impl RequestRouter {
    pub fn new(api_prefix: impl Into<String>, tooling_prefix: impl Into<String>) -> Self {
        Self {
            api: PathPrefixMatcher::new(api_prefix),
            document: DocumentRouteMatcher::new(tooling_prefix),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.api_prefix.clone(), config.tooling_prefix.clone())
    }

    /// Classify by method and path. A query string, if present, is ignored.
    pub fn classify(&self, method: &Method, path: &str) -> RouteKind {
        let path = path.split('?').next().unwrap_or(path);
        if self.api.matches(method, path) {
            RouteKind::ApiProxy
        } else if self.document.matches(method, path) {
            RouteKind::DocumentInjector
        } else {
            RouteKind::PassThrough
        }
    }

    pub fn route<B>(&self, req: &Request<B>) -> RouteKind {
        self.classify(req.method(), req.uri().path())
    }
}

impl Default for RequestRouter {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

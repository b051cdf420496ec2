//! Route matching logic.
//!
//! # Responsibilities
//! - Match the reserved API path prefix
//! - Recognize document routes (extensionless GETs outside dev tooling)
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Query strings never take part in matching
//! - Prefixes end on a path segment boundary
//! - No regex: prefix and character checks only

use axum::http::Method;

/// Trait for matching a request line against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the method and path (without query) match.
    fn matches(&self, method: &Method, path: &str) -> bool;
}

/// Matches the request path prefix, regardless of method.
///
/// The prefix must end on a segment boundary: `/action` matches `/action`
/// and `/action/...` but not `/actions`.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, _method: &Method, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => {
                self.prefix.ends_with('/')
                    || rest.is_empty()
                    || rest.starts_with('/')
                    || rest.starts_with('.')
            }
            None => false,
        }
    }
}

/// Matches GET requests for paths that look like rendered pages.
#[derive(Debug, Clone)]
pub struct DocumentRouteMatcher {
    tooling_prefix: String,
}

impl DocumentRouteMatcher {
    pub fn new(tooling_prefix: impl Into<String>) -> Self {
        Self {
            tooling_prefix: tooling_prefix.into(),
        }
    }
}

impl Matcher for DocumentRouteMatcher {
    fn matches(&self, method: &Method, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        method == Method::GET
            && !path.contains('.')
            && (self.tooling_prefix.is_empty() || !path.starts_with(&self.tooling_prefix))
    }
}

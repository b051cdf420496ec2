//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the dispatch middleware
//! - Classify every request before static file resolution
//! - Hand API requests to the pass-through proxy
//! - Hand document routes to the injector
//! - Fall through to local static serving for everything else
//! - Observability (tracing spans, metrics)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::{DevProxyConfig, TimeoutConfig, UpstreamConfig};
use crate::http::request::request_span;
use crate::http::{api_proxy, document};
use crate::observability::metrics;
use crate::rewrite::RewriteRuleSet;
use crate::routing::{RequestRouter, RouteKind};

/// Application state injected into handlers. Everything in it is read-only.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamConfig>,
    pub rules: Arc<RewriteRuleSet>,
    pub router: Arc<RequestRouter>,
    pub client: reqwest::Client,
    pub upstream_timeout: Duration,
}

impl AppState {
    pub fn new(
        upstream: UpstreamConfig,
        rules: RewriteRuleSet,
        router: RequestRouter,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            upstream: Arc::new(upstream),
            rules: Arc::new(rules),
            router: Arc::new(router),
            client: build_client(timeouts)?,
            upstream_timeout: Duration::from_secs(timeouts.upstream_secs),
        })
    }
}

/// Upstream client: no redirect following, no transparent decompression.
fn build_client(timeouts: &TimeoutConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .no_proxy()
        .build()
}

/// HTTP server for the dev proxy.
pub struct HttpServer {
    router: Router,
    config: DevProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server. `rules` must already reflect the manifest.
    pub fn new(
        config: DevProxyConfig,
        upstream: UpstreamConfig,
        rules: RewriteRuleSet,
    ) -> Result<Self, reqwest::Error> {
        let state = AppState::new(
            upstream,
            rules,
            RequestRouter::from_config(&config.server),
            &config.timeouts,
        )?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router: dispatch first, static files as the fallback.
    fn build_router(config: &DevProxyConfig, state: AppState) -> Router {
        let static_files = ServeDir::new(PathBuf::from(&config.server.static_root));
        Router::new()
            .fallback_service(static_files)
            .layer(middleware::from_fn_with_state(state, dispatch))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| request_span(req)))
    }

    /// The router, for serving without a listener (tests, embedding).
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until a shutdown broadcast arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            api_prefix = %self.config.server.api_prefix,
            static_root = %self.config.server.static_root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DevProxyConfig {
        &self.config
    }
}

/// Classify the request and hand it to the matching proxy, or let it fall
/// through to static serving.
async fn dispatch(State(state): State<AppState>, request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let route = state.router.route(&request);
    let method = request.method().clone();

    let response = match route {
        RouteKind::ApiProxy => api_proxy::forward(&state, request).await,
        RouteKind::DocumentInjector => document::inject(&state, request).await,
        RouteKind::PassThrough => Ok(next.run(request).await),
    };

    let response = response.unwrap_or_else(|e| {
        tracing::error!(route = route.as_str(), error = %e, "Proxy request failed");
        e.into_response()
    });

    metrics::record_request(route, method.as_str(), response.status().as_u16(), start_time);
    response
}

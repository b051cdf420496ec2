//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use axum::Router;
use tokio::net::TcpListener;

use theme_dev_proxy::config::{validate_config, DevProxyConfig};
use theme_dev_proxy::{BuildManifest, HttpServer, RewriteRuleSet, Shutdown};

/// What the mock upstream saw.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[allow(dead_code)]
pub type CaptureLog = Arc<Mutex<Vec<Captured>>>;

#[allow(dead_code)]
pub fn capture_log() -> CaptureLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Serve `app` on an ephemeral local port.
pub async fn start_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// A local address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn manifest() -> BuildManifest {
    BuildManifest::new(["main.css"], ["app.js"])
}

pub fn config_for(upstream: SocketAddr) -> DevProxyConfig {
    DevProxyConfig {
        source_url: format!("http://{}/", upstream),
        ..DevProxyConfig::default()
    }
}

/// Build and run a proxy for `config`, returning its address.
pub async fn start_proxy(config: DevProxyConfig) -> (SocketAddr, Shutdown) {
    let upstream = validate_config(&config).unwrap();
    let rules = RewriteRuleSet::compile(
        upstream.blank_mode,
        &manifest(),
        &config.assets,
        &config.rewrite,
    )
    .unwrap();
    let server = HttpServer::new(config, upstream, rules).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    (addr, shutdown)
}

/// Rules identical to the ones `start_proxy` compiles.
#[allow(dead_code)]
pub fn rules(blank_mode: bool) -> RewriteRuleSet {
    RewriteRuleSet::with_defaults(blank_mode, &manifest()).unwrap()
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

//! Theme development reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────────┐
//!   Browser request    │                 DEV PROXY                      │
//!   ───────────────────┼─▶ dispatch ──┬─▶ api_proxy ──────────────────┐ │
//!                      │              │   (stream verbatim)           │ │
//!                      │              ├─▶ document ─▶ codec ─▶ rewrite│ │──▶ Upstream
//!                      │              │   (fetch, decode, inject)     │ │    platform
//!                      │              └─▶ static files (ServeDir)     │ │
//!   ◀──────────────────┼──────────────────────────────────────────────┘ │
//!                      └────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::net::TcpListener;

use theme_dev_proxy::config::{load_config, loader, validate_config};
use theme_dev_proxy::observability::{logging, metrics};
use theme_dev_proxy::{BuildManifest, HttpServer, RewriteRuleSet, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "theme-dev-proxy")]
#[command(about = "Serve a remote shop through a local origin with live local theme assets", long_about = None)]
struct Args {
    /// Configuration file (.json or .toml).
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Strip the platform's own CDN stylesheet.
    #[arg(long)]
    blank: bool,

    /// Override the bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the directory served for non-proxied requests.
    #[arg(long)]
    static_root: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    loader::apply_env_overrides(&mut config, std::env::var(loader::BLANK_ENV).ok().as_deref());
    if args.blank {
        config.blank_mode = true;
    }
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(root) = args.static_root {
        config.server.static_root = root;
    }

    logging::init_logging(&config.observability);
    tracing::info!("theme-dev-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let upstream = validate_config(&config).map_err(loader::ConfigError::Validation)?;
    tracing::info!(
        source_url = %upstream.origin,
        blank_mode = upstream.blank_mode,
        bind_address = %config.server.bind_address,
        "Configuration loaded"
    );

    let manifest = BuildManifest::discover(
        Path::new(&config.assets.styles_dir),
        Path::new(&config.assets.scripts_dir),
    )?;
    tracing::info!(
        styles = ?manifest.styles(),
        scripts = ?manifest.scripts(),
        "Build manifest discovered"
    );
    let rules = RewriteRuleSet::compile(
        upstream.blank_mode,
        &manifest,
        &config.assets,
        &config.rewrite,
    )?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config, upstream, rules)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

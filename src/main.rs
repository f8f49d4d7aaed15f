//! Dev server for the edge router.
//!
//! Serves a small demo API behind the router and falls back to a static
//! asset directory for everything else. Routes are registered in code;
//! the config file only controls the listener, the asset directory and
//! the cross-origin allow-list.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edge_router::config::{load_config, ServerConfig};
use edge_router::http::response;
use edge_router::{DevServer, DirectoryAssets, EdgeRouter, MethodTable, WorkerEnv};

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Dev server for pattern-based edge routing", long_about = None)]
struct Cli {
    /// Path to the TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Demo routes served under /api.
fn demo_router(config: &ServerConfig) -> EdgeRouter {
    let mut api = EdgeRouter::with_allowed_origins("/api", config.cors.allow_origins.clone());

    api.register(
        "/health",
        MethodTable::new().get(|_ctx| async { Ok(response::json(&serde_json::json!({ "status": "ok" }))) }),
    );

    api.register(
        "/echo/:word",
        MethodTable::new().get(|ctx| async move {
            let word = ctx.params.get("word").cloned().unwrap_or_default();
            Ok(response::text(word))
        }),
    );

    api
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "edge_router={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        assets_dir = %config.assets.dir,
        allow_origins = ?config.cors.allow_origins,
        "Configuration loaded"
    );

    let env = WorkerEnv::new(Arc::new(DirectoryAssets::new(config.assets.dir.clone())));
    let fetch = demo_router(&config).into_fetch_handler([]);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    DevServer::new(fetch, env).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! Development server around a composed fetch handler.
//!
//! # Responsibilities
//! - Wrap a FetchHandler in an Axum catch-all service
//! - Bind to a listener and serve with graceful shutdown
//! - Translate propagated handler errors into 500 responses at the edge
//!
//! # Design Decisions
//! - One catch-all route; all real routing happens in the FetchHandler
//! - Handler errors are the application's responsibility; the server
//!   boundary logs them and answers 500 so the connection stays sane
//! - No timeouts or cancellation here beyond what the runtime provides

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::context::WorkerEnv;
use crate::http::response;
use crate::routing::compose::FetchHandler;

/// State injected into the catch-all handler.
#[derive(Clone)]
struct AppState {
    fetch: Arc<FetchHandler>,
    env: WorkerEnv,
}

/// Dev server serving a composed router plus static assets.
pub struct DevServer {
    app: Router,
}

impl DevServer {
    /// Build the server around a fetch handler and environment.
    pub fn new(fetch: FetchHandler, env: WorkerEnv) -> Self {
        let state = AppState {
            fetch: Arc::new(fetch),
            env,
        };

        let app = Router::new()
            .route("/{*path}", any(entry))
            .route("/", any(entry))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Self { app }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Dev server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Dev server stopped");
        Ok(())
    }
}

/// Catch-all entry delegating to the fetch handler.
async fn entry(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match state.fetch.fetch(request, state.env.clone()).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(method = %method, path = %path, error = %e, "Handler failed");
            response::status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

//! HTTP server exposing the turn pipeline
//!
//! Routes:
//! - `GET /health` - liveness check
//! - `POST /api/chat` - one conversation turn

mod error;
mod handlers;
mod state;

pub use error::{ApiError, NOT_CONFIGURED_MESSAGE, PROCESSING_FAILED_MESSAGE};
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{CurioError, Result};

/// The chat server
pub struct ChatServer {
    addr: SocketAddr,
    state: Arc<AppState>,
}

impl ChatServer {
    /// Create a server from configuration, wiring the remote completion client
    pub fn new(config: &Config) -> Result<Self> {
        let addr = config.server.socket_addr()?;
        let state = AppState::from_config(&config.completion, &config.pipeline)?;
        Ok(Self::with_state(addr, state))
    }

    /// Create a server over prepared state
    pub fn with_state(addr: SocketAddr, state: AppState) -> Self {
        Self {
            addr,
            state: Arc::new(state),
        }
    }

    /// Bind and serve until Ctrl+C or SIGTERM
    pub async fn serve(&self) -> Result<()> {
        let app = create_router(self.state.clone());

        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| CurioError::Server(format!("Failed to bind to {}: {e}", self.addr)))?;

        tracing::info!("Curio listening on {}", self.addr);
        if self.state.orchestrator.is_none() {
            tracing::warn!("No completion credential configured; /api/chat will return errors");
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CurioError::Server(format!("Server error: {e}")))?;

        tracing::info!("Chat server shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/chat", post(handlers::chat_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

//! HTTP server that publishes a catalog file.
//!
//! Routes:
//!
//! - `GET /health` reports liveness with a timestamp.
//! - `GET /api/plans` returns the plan array, re-read from disk on every
//!   request so edits to the data file show up without a restart.

use crate::adapters::file::read_catalog;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerState {
    data_path: Arc<PathBuf>,
}

impl ServerState {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: Arc::new(data_path.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/plans", get(list_plans))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn list_plans(State(state): State<ServerState>) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("GET /api/plans requested");
    match read_catalog(&state.data_path).await {
        Ok(plans) => {
            tracing::info!("Returning {} plans", plans.len());
            Ok(Json(plans))
        }
        Err(e) => {
            tracing::error!("Error loading plans from {}: {}", state.data_path.display(), e);
            Err(ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: "Failed to load plans data",
                message: e.to_string(),
            })
        }
    }
}

/// Serves until the listener fails or the process is interrupted.
pub async fn run_server(state: ServerState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

pub async fn serve_with_shutdown<F>(
    listener: tokio::net::TcpListener,
    state: ServerState,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    tracing::info!("Catalog server running at http://{}", local);
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("Shutting down catalog server");
        })
        .await?;
    Ok(())
}

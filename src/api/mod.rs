//! HTTP API — Axum server exposing the round registry.
//!
//! Routes live under `/api/roulettes`. CORS is open to any origin and
//! every request is traced through `tower-http`.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use routes::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/roulettes",
            post(routes::create_round).get(routes::list_rounds),
        )
        .route("/api/roulettes/:id", get(routes::get_round))
        .route("/api/roulettes/:id/open", patch(routes::open_round))
        .route("/api/roulettes/:id/bets", post(routes::place_wager))
        .route("/api/roulettes/:id/close", patch(routes::close_round))
        .route("/health", get(routes::health))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(state: AppState, addr: &str, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("API server error")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

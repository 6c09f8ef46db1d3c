//! HTTP route handlers.
//!
//! Thin adapter over `RoundRegistry`: extract, lock, call, map errors.
//! All endpoints return JSON. State is shared via `Arc<ApiState>`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::engine::RoundRegistry;
use crate::types::{
    OpenedRound, Outcome, RoundDetail, RoundError, RoundSummary, Wager, WagerRequest,
};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers. One registry-wide lock:
/// mutations serialize, reads share.
pub struct ApiState {
    pub registry: RwLock<RoundRegistry>,
}

impl ApiState {
    pub fn new(registry: RoundRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }
}

pub type AppState = Arc<ApiState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WagerPlacedResponse {
    pub ok: bool,
    pub wager: Wager,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// A domain error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub RoundError);

impl From<RoundError> for ApiError {
    fn from(e: RoundError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            RoundError::NotFound => StatusCode::NOT_FOUND,
            RoundError::NotOpen => StatusCode::CONFLICT,
            RoundError::InvalidAmount
            | RoundError::BetTypeRequired
            | RoundError::InvalidNumber
            | RoundError::InvalidColor => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.0 {
            RoundError::NotFound => "Roulette not found",
            RoundError::NotOpen => "Roulette is not open",
            RoundError::InvalidAmount => "Invalid amount (must be > 0 and <= 10000)",
            RoundError::BetTypeRequired => "Bet on a number or a color (not both)",
            RoundError::InvalidNumber => "Invalid number (0..36)",
            RoundError::InvalidColor => "Invalid color ('rojo'/'red' or 'negro'/'black')",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
            code: Some(self.0.code()),
        };
        (self.status(), Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/roulettes
pub async fn create_round(State(state): State<AppState>) -> (StatusCode, Json<CreatedResponse>) {
    let id = state.registry.write().await.create();
    (StatusCode::CREATED, Json(CreatedResponse { id }))
}

/// GET /api/roulettes
pub async fn list_rounds(State(state): State<AppState>) -> Json<Vec<RoundSummary>> {
    Json(state.registry.read().await.list())
}

/// GET /api/roulettes/:id
pub async fn get_round(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoundDetail>, ApiError> {
    let detail = state.registry.read().await.get(&id)?;
    Ok(Json(detail))
}

/// PATCH /api/roulettes/:id/open
pub async fn open_round(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OpenedRound>, ApiError> {
    let opened = state.registry.write().await.open(&id)?;
    Ok(Json(opened))
}

/// POST /api/roulettes/:id/bets
///
/// A missing or unparseable body is treated as an empty payload.
pub async fn place_wager(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<WagerRequest>>,
) -> Result<(StatusCode, Json<WagerPlacedResponse>), ApiError> {
    let req = payload.map(|Json(p)| p).unwrap_or_default();
    let wager = state.registry.write().await.place_wager(&id, &req)?;
    Ok((
        StatusCode::CREATED,
        Json(WagerPlacedResponse { ok: true, wager }),
    ))
}

/// PATCH /api/roulettes/:id/close
pub async fn close_round(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    let outcome = state.registry.write().await.close(&id)?;
    Ok(Json(outcome))
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
            code: None,
        }),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

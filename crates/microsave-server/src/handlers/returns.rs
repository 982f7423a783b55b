//! Returns projection handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use microsave_core::{compute_returns, InvestmentMode, ReturnProjection, ReturnsRequest};

/// POST /api/returns/nps - Project NPS returns with tax benefit
pub async fn returns_nps(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReturnsRequest>,
) -> Result<Json<ReturnProjection>, AppError> {
    project(&state, &request, InvestmentMode::Nps)
}

/// POST /api/returns/index - Project index fund returns
pub async fn returns_index(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReturnsRequest>,
) -> Result<Json<ReturnProjection>, AppError> {
    project(&state, &request, InvestmentMode::Index)
}

fn project(
    state: &AppState,
    request: &ReturnsRequest,
    mode: InvestmentMode,
) -> Result<Json<ReturnProjection>, AppError> {
    let projection = compute_returns(request, mode, &state.projection)?;
    Ok(Json(projection))
}

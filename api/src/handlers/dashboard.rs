//! Dashboard handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::domain::entities::{DashboardStats, UserId};
use crate::error::AppError;
use crate::AppState;

/// GET /users/:id/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = state.dashboard_service.stats(&UserId(id)).await?;
    Ok(Json(stats))
}

use std::sync::Arc;

use axum::{extract::State, Json};
use coachbook_core::models::admin::DashboardStats;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn stats(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DashboardStats>, AppError> {
    let total_packages = state.store.count_packages().await?;
    let counts = state.store.booking_status_counts().await?;
    Ok(Json(DashboardStats::from_counts(total_packages, &counts)))
}

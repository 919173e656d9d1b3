use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use coachbook_core::{
    errors::CoachError,
    models::package::{Package, PackageInput, PackageView, UpdatePackageRequest},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_packages(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<PackageView>>, AppError> {
    let packages = state.store.list_packages().await?;
    Ok(Json(packages.into_iter().map(PackageView::from).collect()))
}

#[axum::debug_handler]
pub async fn create_package(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<PackageInput>,
) -> Result<(StatusCode, Json<Package>), AppError> {
    let input = payload.validate()?;
    let package = state.store.create_package(&input).await?;
    info!("Package {} created", package.id);
    Ok((StatusCode::CREATED, Json(package)))
}

#[axum::debug_handler]
pub async fn update_package(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePackageRequest>,
) -> Result<Json<Package>, AppError> {
    let current = state
        .store
        .get_package(id)
        .await?
        .ok_or_else(|| CoachError::not_found("Package", id))?;

    let input = payload.apply_to(&current)?;
    let package = state
        .store
        .update_package(id, &input)
        .await?
        .ok_or_else(|| CoachError::not_found("Package", id))?;

    Ok(Json(package))
}

#[axum::debug_handler]
pub async fn delete_package(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_package(id).await? {
        return Err(CoachError::not_found("Package", id).into());
    }
    info!("Package {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

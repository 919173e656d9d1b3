use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use coachbook_core::{
    availability::{self, DayAvailability},
    errors::CoachError,
    models::{
        booking::DateQuery,
        time_slot::{CreateTimeSlotRequest, TimeSlot, UpdateTimeSlotRequest},
    },
    validation,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

/// Public view of one day: every slot with how many places remain.
#[axum::debug_handler]
pub async fn day_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayAvailability>, AppError> {
    let date = validation::parse_date(&query.date)?;

    let slots = state.store.list_time_slots_between(date, date).await?;
    let bookings = state.store.list_active_bookings_between(date, date).await?;

    Ok(Json(availability::day_availability(date, &slots, &bookings)))
}

#[axum::debug_handler]
pub async fn list_time_slots(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = state.store.list_all_time_slots().await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn create_time_slot(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlot>), AppError> {
    let new_slot = payload.validate()?;
    let slot = state.store.create_time_slot(&new_slot).await?;
    info!("Time slot {} created for {} {}", slot.id, slot.date, slot.start_time);
    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn update_time_slot(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTimeSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let current = state
        .store
        .get_time_slot(id)
        .await?
        .ok_or_else(|| CoachError::not_found("Time slot", id))?;

    let changes = payload.apply_to(&current)?;
    let slot = state
        .store
        .update_time_slot(id, &changes)
        .await?
        .ok_or_else(|| CoachError::not_found("Time slot", id))?;

    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_time_slot(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_time_slot(id).await? {
        return Err(CoachError::not_found("Time slot", id).into());
    }
    info!("Time slot {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

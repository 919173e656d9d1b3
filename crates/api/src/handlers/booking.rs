use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use coachbook_core::{
    availability,
    errors::CoachError,
    models::booking::{
        BookedTimesResponse, Booking, BookingListQuery, BookingStatus, CancelBookingRequest,
        CreateBookingRequest, DateQuery, EmailQuery, UpdateBookingStatusRequest,
    },
    notice::StatusNotice,
    validation,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

/// Tells the client about a status change. Failures are only logged.
async fn notify_status(state: &ApiState, booking: &Booking) {
    let notice = StatusNotice::for_status(booking.status);
    if let Err(e) = state.notifier.booking_status_changed(booking, &notice).await {
        warn!("Failed to notify {} about booking {}: {:?}", booking.email, booking.id, e);
    }
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let new_booking = payload.validate()?;

    if new_booking.is_past(Utc::now().naive_utc()) {
        return Err(CoachError::validation("Cannot book a time in the past").into());
    }

    // Slot capacity and the single-session rule are checked by the store
    // inside the insert transaction
    let booking = state.store.create_booking(&new_booking).await?;
    info!("Booking {} created for {} {}", booking.id, booking.date, booking.time);

    if let Err(e) = state.notifier.booking_received(&booking).await {
        warn!("Failed to send booking confirmation to {}: {:?}", booking.email, e);
    }

    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn list_bookings_by_email(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let email = validation::normalize_email(&query.email)?;
    let bookings = state.store.list_active_bookings_by_email(&email).await?;
    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn booked_times(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BookedTimesResponse>, AppError> {
    let date = validation::parse_date(&query.date)?;
    let bookings = state.store.list_active_bookings_between(date, date).await?;

    Ok(Json(BookedTimesResponse {
        date,
        times: availability::booked_times(&bookings),
    }))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let email = validation::normalize_email(&payload.email)?;

    let booking = state
        .store
        .get_booking(id)
        .await?
        .ok_or_else(|| CoachError::not_found("Booking", id))?;

    // Do not reveal whether the booking exists to someone else
    if booking.email != email {
        return Err(CoachError::not_found("Booking", id).into());
    }

    let next = booking.status.transition_to(BookingStatus::Cancelled)?;
    if next == booking.status {
        return Ok(Json(booking));
    }

    let booking = state
        .store
        .update_booking_status(id, booking.status, next)
        .await?
        .ok_or_else(|| CoachError::not_found("Booking", id))?;

    info!("Booking {} cancelled by client", booking.id);
    notify_status(&state, &booking).await;

    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn list_bookings(
    _session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.store.list_bookings(query.status).await?;
    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn update_booking_status(
    session: AdminSession,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .store
        .get_booking(id)
        .await?
        .ok_or_else(|| CoachError::not_found("Booking", id))?;

    let next = booking.status.transition_to(payload.status)?;
    if next == booking.status {
        return Ok(Json(booking));
    }

    let booking = state
        .store
        .update_booking_status(id, booking.status, next)
        .await?
        .ok_or_else(|| CoachError::not_found("Booking", id))?;

    info!("Booking {} set to {} by {}", booking.id, booking.status, session.email);
    notify_status(&state, &booking).await;

    Ok(Json(booking))
}

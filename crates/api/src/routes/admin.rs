use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

/// Dashboard routes. Every handler takes an `AdminSession`, so requests
/// without a valid access token are answered with 401.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/stats", get(handlers::dashboard::stats))
        .route("/api/admin/bookings", get(handlers::booking::list_bookings))
        .route(
            "/api/admin/bookings/:id/status",
            put(handlers::booking::update_booking_status),
        )
        .route("/api/admin/packages", post(handlers::package::create_package))
        .route(
            "/api/admin/packages/:id",
            put(handlers::package::update_package).delete(handlers::package::delete_package),
        )
        .route(
            "/api/admin/time-slots",
            get(handlers::time_slot::list_time_slots).post(handlers::time_slot::create_time_slot),
        )
        .route(
            "/api/admin/time-slots/:id",
            put(handlers::time_slot::update_time_slot).delete(handlers::time_slot::delete_time_slot),
        )
        .route(
            "/api/admin/password",
            post(handlers::auth::change_password),
        )
}

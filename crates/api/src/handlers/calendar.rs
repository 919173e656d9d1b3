use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use coachbook_core::calendar::{self, CalendarMonth, MonthAvailability};

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn month(
    State(state): State<Arc<ApiState>>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthAvailability>, AppError> {
    let month = CalendarMonth::new(year, month)?;
    let (from, to) = (month.first_day(), month.last_day());

    let slots = state.store.list_time_slots_between(from, to).await?;
    let bookings = state.store.list_active_bookings_between(from, to).await?;

    Ok(Json(calendar::month_availability(month, &slots, &bookings)))
}

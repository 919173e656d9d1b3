//! Per-day availability computed from admin time slots and active bookings.
//!
//! A slot accepts up to `max_bookings` active (pending or confirmed)
//! bookings starting at its `start_time`. A slot flagged unavailable by the
//! admin is closed regardless of how many bookings it holds.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoachError, CoachResult};
use crate::models::{booking::Booking, time_slot::TimeSlot};
use crate::validation::{hhmm, TIME_FORMAT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub id: Uuid,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub max_bookings: i32,
    pub booked: i64,
    pub remaining: i64,
    pub is_open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<SlotAvailability>,
}

impl DayAvailability {
    pub fn open_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_open).count()
    }

    /// True when the day has slots but none of them can take a booking.
    pub fn is_fully_booked(&self) -> bool {
        !self.slots.is_empty() && self.open_slots() == 0
    }
}

fn active_counts<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> HashMap<(NaiveDate, NaiveTime), i64> {
    let mut counts = HashMap::new();
    for booking in bookings.into_iter().filter(|b| b.status.is_active()) {
        *counts.entry((booking.date, booking.time)).or_insert(0) += 1;
    }
    counts
}

fn slot_availability(slot: &TimeSlot, booked: i64) -> SlotAvailability {
    let remaining = (i64::from(slot.max_bookings) - booked).max(0);
    SlotAvailability {
        id: slot.id,
        start_time: slot.start_time,
        end_time: slot.end_time,
        max_bookings: slot.max_bookings,
        booked,
        remaining,
        is_open: slot.is_available && remaining > 0,
    }
}

/// Builds the availability of `date`. Slots or bookings for other dates are
/// ignored, so callers may pass a wider set.
pub fn day_availability(date: NaiveDate, slots: &[TimeSlot], bookings: &[Booking]) -> DayAvailability {
    let counts = active_counts(bookings.iter().filter(|b| b.date == date));
    let mut day_slots: Vec<SlotAvailability> = slots
        .iter()
        .filter(|slot| slot.date == date)
        .map(|slot| {
            let booked = counts.get(&(slot.date, slot.start_time)).copied().unwrap_or(0);
            slot_availability(slot, booked)
        })
        .collect();
    day_slots.sort_by_key(|s| s.start_time);

    DayAvailability {
        date,
        slots: day_slots,
    }
}

/// Start times held by active bookings, sorted and de-duplicated.
pub fn booked_times(bookings: &[Booking]) -> Vec<String> {
    bookings
        .iter()
        .filter(|b| b.status.is_active())
        .map(|b| b.time)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|t| t.format(TIME_FORMAT).to_string())
        .collect()
}

/// Decides whether one more booking fits at `time`, given the slot starting
/// at that time (if any) and the number of active bookings it already holds.
pub fn ensure_bookable(slot: Option<&TimeSlot>, time: NaiveTime, active_count: i64) -> CoachResult<()> {
    let slot = slot.ok_or_else(|| {
        CoachError::validation(format!(
            "No time slot starts at {}",
            time.format(TIME_FORMAT)
        ))
    })?;

    if !slot.is_available {
        return Err(CoachError::Conflict("This time slot is not available".into()));
    }
    if active_count >= i64::from(slot.max_bookings) {
        return Err(CoachError::Conflict("This time slot is already booked".into()));
    }
    Ok(())
}

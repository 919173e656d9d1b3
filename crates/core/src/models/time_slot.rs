use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoachError, CoachResult};
use crate::validation::{self, hhmm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimeSlotRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub is_available: Option<bool>,
    pub max_bookings: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
}

fn check_window(start: NaiveTime, end: NaiveTime, max_bookings: i32) -> CoachResult<()> {
    if end <= start {
        return Err(CoachError::validation("End time must be after start time"));
    }
    if max_bookings < 1 {
        return Err(CoachError::validation("Max bookings must be at least 1"));
    }
    Ok(())
}

impl CreateTimeSlotRequest {
    pub fn validate(&self) -> CoachResult<NewTimeSlot> {
        let slot = NewTimeSlot {
            date: validation::parse_date(&self.date)?,
            start_time: validation::parse_time(&self.start_time)?,
            end_time: validation::parse_time(&self.end_time)?,
            is_available: self.is_available.unwrap_or(true),
            max_bookings: self.max_bookings.unwrap_or(1),
        };
        check_window(slot.start_time, slot.end_time, slot.max_bookings)?;
        Ok(slot)
    }
}

/// Partial update of a slot. The date of a slot never changes; delete and
/// recreate it instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTimeSlotRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_available: Option<bool>,
    pub max_bookings: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlotChanges {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
}

impl UpdateTimeSlotRequest {
    pub fn apply_to(&self, current: &TimeSlot) -> CoachResult<TimeSlotChanges> {
        let start_time = match &self.start_time {
            Some(raw) => validation::parse_time(raw)?,
            None => current.start_time,
        };
        let end_time = match &self.end_time {
            Some(raw) => validation::parse_time(raw)?,
            None => current.end_time,
        };
        let changes = TimeSlotChanges {
            start_time,
            end_time,
            is_available: self.is_available.unwrap_or(current.is_available),
            max_bookings: self.max_bookings.unwrap_or(current.max_bookings),
        };
        check_window(changes.start_time, changes.end_time, changes.max_bookings)?;
        Ok(changes)
    }
}

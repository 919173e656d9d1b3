//! Month grid used by the booking page calendar.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::day_availability;
use crate::errors::{CoachError, CoachResult};
use crate::models::{booking::Booking, time_slot::TimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1-based month number.
    pub month: u32,
    /// Weekday of the 1st, 0 = Sunday.
    pub first_weekday: u32,
    pub days_in_month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> CoachResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CoachError::validation(format!("Invalid month: {year}-{month}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| CoachError::validation(format!("Invalid month: {year}-{month}")))?;

        Ok(CalendarMonth {
            year,
            month,
            first_weekday: first.weekday().num_days_from_sunday(),
            days_in_month: next.signed_duration_since(first).num_days() as u32,
        })
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month).unwrap_or(NaiveDate::MIN)
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Rows of seven cells starting on Sunday. Cells outside the month are
    /// `None`.
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let mut weeks = Vec::new();
        let mut counter = 1 - self.first_weekday as i64;
        let days = i64::from(self.days_in_month);

        while counter <= days {
            let mut week = [None; 7];
            for cell in week.iter_mut() {
                if (1..=days).contains(&counter) {
                    *cell = Some(counter as u32);
                }
                counter += 1;
            }
            weeks.push(week);
        }
        weeks
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub total_slots: usize,
    pub open_slots: usize,
    pub fully_booked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthAvailability {
    #[serde(flatten)]
    pub month: CalendarMonth,
    pub weeks: Vec<[Option<u32>; 7]>,
    pub days: Vec<CalendarDay>,
}

pub fn month_availability(month: CalendarMonth, slots: &[TimeSlot], bookings: &[Booking]) -> MonthAvailability {
    let days = (1..=month.days_in_month)
        .filter_map(|d| month.day(d))
        .map(|date| {
            let day = day_availability(date, slots, bookings);
            CalendarDay {
                date,
                total_slots: day.slots.len(),
                open_slots: day.open_slots(),
                fully_booked: day.is_fully_booked(),
            }
        })
        .collect();

    MonthAvailability {
        month,
        weeks: month.weeks(),
        days,
    }
}

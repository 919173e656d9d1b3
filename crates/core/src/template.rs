//! Default weekly opening hours, expanded into dated slots when seeding.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::models::time_slot::NewTimeSlot;

pub const SESSION_MINUTES: i64 = 40;

/// (weekday, start hour, start minute) of each default session.
pub const DEFAULT_WEEK: &[(Weekday, u32, u32)] = &[
    (Weekday::Mon, 9, 0),
    (Weekday::Mon, 10, 30),
    (Weekday::Mon, 14, 0),
    (Weekday::Mon, 15, 30),
    (Weekday::Tue, 9, 0),
    (Weekday::Tue, 10, 30),
    (Weekday::Tue, 14, 0),
    (Weekday::Wed, 9, 0),
    (Weekday::Wed, 14, 0),
    (Weekday::Wed, 15, 30),
    (Weekday::Wed, 17, 0),
    (Weekday::Thu, 9, 0),
    (Weekday::Thu, 10, 30),
    (Weekday::Thu, 14, 0),
    (Weekday::Fri, 9, 0),
    (Weekday::Fri, 10, 30),
    (Weekday::Fri, 12, 0),
];

/// Dated slots for `weeks` weeks starting at `from` (inclusive), in
/// chronological order.
pub fn expand(from: NaiveDate, weeks: u32) -> Vec<NewTimeSlot> {
    let mut slots = Vec::new();
    for offset in 0..i64::from(weeks) * 7 {
        let date = from + Duration::days(offset);
        for (weekday, hour, minute) in DEFAULT_WEEK {
            if date.weekday() != *weekday {
                continue;
            }
            let Some(start_time) = NaiveTime::from_hms_opt(*hour, *minute, 0) else {
                continue;
            };
            slots.push(NewTimeSlot {
                date,
                start_time,
                end_time: start_time + Duration::minutes(SESSION_MINUTES),
                is_available: true,
                max_bookings: 1,
            });
        }
    }
    slots
}

//! Input normalisation shared by every request type.
//!
//! Dates travel as `YYYY-MM-DD` and times as `HH:MM`. Both are checked for
//! their exact shape before chrono parses them, so `9:00` or `2025-1-5` are
//! rejected rather than silently accepted.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::{CoachError, CoachResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'9' => v.is_ascii_digit(),
            other => v == other,
        })
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> CoachResult<NaiveDate> {
    let value = value.trim();
    if !has_shape(value, "9999-99-99") {
        return Err(CoachError::validation(format!(
            "Invalid date format (expected YYYY-MM-DD): {value}"
        )));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CoachError::validation(format!("Invalid date: {value}")))
}

/// Parses an `HH:MM` wall-clock time.
pub fn parse_time(value: &str) -> CoachResult<NaiveTime> {
    let value = value.trim();
    if !has_shape(value, "99:99") {
        return Err(CoachError::validation(format!(
            "Invalid time format (expected HH:MM): {value}"
        )));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| CoachError::validation(format!("Invalid time: {value}")))
}

/// Trims and lowercases an email address, rejecting anything that does not
/// look like `local@domain.tld`.
pub fn normalize_email(value: &str) -> CoachResult<String> {
    let email = value.trim().to_lowercase();
    let valid = !email.is_empty()
        && !email.chars().any(char::is_whitespace)
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty()
                    && domain
                        .rsplit_once('.')
                        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            });

    if valid {
        Ok(email)
    } else if email.is_empty() {
        Err(CoachError::validation("Email is required"))
    } else {
        Err(CoachError::validation(format!("Invalid email: {email}")))
    }
}

pub fn required(field: &str, value: &str) -> CoachResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoachError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Serde adapter that writes `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(super::TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoachError, CoachResult};
use crate::validation::{self, hhmm};

/// Lifecycle of a booking.
///
/// Only `Pending` and `Confirmed` bookings hold their slot. The other three
/// states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
        BookingStatus::NoShow,
    ];

    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::NoShow => "NO_SHOW",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
        )
    }

    pub fn transition_to(&self, next: BookingStatus) -> CoachResult<BookingStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoachError::Conflict(format!(
                "Cannot change booking status from {self} to {next}"
            )))
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoachError::validation(format!("Unknown booking status: {s}")))
    }
}

/// Package tier a booking was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingPackage {
    /// Free discovery session, limited to one per client email.
    Single,
    Pack3,
    Pack5,
    Pack10,
    Unlimited,
    Premium,
}

impl BookingPackage {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingPackage::Single => "single",
            BookingPackage::Pack3 => "pack3",
            BookingPackage::Pack5 => "pack5",
            BookingPackage::Pack10 => "pack10",
            BookingPackage::Unlimited => "unlimited",
            BookingPackage::Premium => "premium",
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, BookingPackage::Single)
    }
}

impl fmt::Display for BookingPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingPackage {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(BookingPackage::Single),
            "pack3" => Ok(BookingPackage::Pack3),
            "pack5" => Ok(BookingPackage::Pack5),
            "pack10" => Ok(BookingPackage::Pack10),
            "unlimited" => Ok(BookingPackage::Unlimited),
            "premium" => Ok(BookingPackage::Premium),
            other => Err(CoachError::validation(format!("Unknown package: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub status: BookingStatus,
    pub message: Option<String>,
    pub package: Option<BookingPackage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public booking form payload. Dates and times arrive as strings so the
/// error message can name the exact format problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(alias = "notes")]
    pub message: Option<String>,
    pub package: Option<BookingPackage>,
}

/// A validated, normalised booking ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub message: Option<String>,
    pub package: Option<BookingPackage>,
}

impl NewBooking {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.starts_at() < now
    }
}

impl CreateBookingRequest {
    pub fn validate(&self) -> CoachResult<NewBooking> {
        Ok(NewBooking {
            name: validation::required("Name", &self.name)?,
            email: validation::normalize_email(&self.email)?,
            phone: validation::optional(self.phone.clone()),
            date: validation::parse_date(&self.date)?,
            time: validation::parse_time(&self.time)?,
            message: validation::optional(self.message.clone()),
            package: self.package,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedTimesResponse {
    pub date: NaiveDate,
    pub times: Vec<String>,
}

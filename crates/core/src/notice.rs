//! Client-facing wording for booking status changes.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::booking::BookingStatus;
use crate::validation::{DATE_FORMAT, TIME_FORMAT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    pub status: BookingStatus,
    pub title: String,
    pub message: String,
}

impl StatusNotice {
    pub fn for_status(status: BookingStatus) -> Self {
        let (title, message) = match status {
            BookingStatus::Pending => (
                "Your booking is pending",
                "We have received your request and it is being processed. You will receive a confirmation shortly.",
            ),
            BookingStatus::Confirmed => (
                "Your booking is confirmed",
                "Good news! Your booking has been confirmed. We look forward to seeing you.",
            ),
            BookingStatus::Cancelled => (
                "Your booking has been cancelled",
                "Your booking was cancelled at your request or by the coach.",
            ),
            BookingStatus::Completed => (
                "Your session is complete",
                "Thank you for attending your session. We hope you enjoyed the experience.",
            ),
            BookingStatus::NoShow => (
                "Missed session",
                "It looks like you could not make it to your session. Feel free to book a new time that suits you.",
            ),
        };

        StatusNotice {
            status,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Booking update: {}", self.title)
    }

    pub fn render_text(&self, client_name: &str, date: NaiveDate, time: NaiveTime) -> String {
        format!(
            "{title}\n\nHello {client_name},\n\n{message}\n\nDate: {date}\nTime: {time}\n\nThank you for your trust.\n",
            title = self.title,
            message = self.message,
            date = date.format(DATE_FORMAT),
            time = time.format(TIME_FORMAT),
        )
    }
}

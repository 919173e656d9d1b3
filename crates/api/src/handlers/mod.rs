pub mod auth;
pub mod booking;
pub mod calendar;
pub mod contact;
pub mod dashboard;
pub mod package;
pub mod time_slot;

pub mod admin;
pub mod auth;
pub mod booking;
pub mod calendar;
pub mod contact;
pub mod health;
pub mod package;
pub mod time_slot;

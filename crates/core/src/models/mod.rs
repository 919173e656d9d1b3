pub mod admin;
pub mod booking;
pub mod contact;
pub mod package;
pub mod time_slot;

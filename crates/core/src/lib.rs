//! # Coachbook Core
//!
//! Domain types and rules shared by the storage layer and the HTTP API:
//! bookings and their status lifecycle, service packages, admin time slots,
//! availability and calendar views, and client notices.
//!
//! Nothing in this crate touches the network or the database, so every rule
//! here can be exercised with plain unit tests.

pub mod availability;
pub mod calendar;
pub mod errors;
pub mod models;
pub mod notice;
pub mod template;
pub mod validation;

pub use errors::{CoachError, CoachResult};

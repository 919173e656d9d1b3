//! Query functions, one module per table.
//!
//! Functions that take a `&mut PgConnection` are meant to run inside a
//! transaction opened by the caller; the rest take the pool directly.

pub mod admin;
pub mod booking;
pub mod package;
pub mod time_slot;

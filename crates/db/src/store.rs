//! # Store
//!
//! The storage seam used by the HTTP handlers. `PgStore` implements it on top
//! of the repository functions; tests use the generated `MockStore`.
//!
//! Every method returns `CoachResult` so handlers can tell a uniqueness
//! violation (`CoachError::Conflict`) apart from an infrastructure failure
//! (`CoachError::Database`).

use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook_core::{
    availability::ensure_bookable,
    errors::{CoachError, CoachResult},
    models::{
        admin::Admin,
        booking::{Booking, BookingStatus, NewBooking},
        package::{Package, PackageInput},
        time_slot::{NewTimeSlot, TimeSlot, TimeSlotChanges},
    },
};
use mockall::automock;
use uuid::Uuid;

use crate::{models::into_bookings, repositories, schema::SINGLE_SESSION_INDEX, DbPool};

const SINGLE_SESSION_USED: &str = "You have already used your free single session";

#[automock]
#[async_trait]
pub trait Store: Send + Sync {
    // Bookings

    /// Books a slot atomically: the slot must exist, be available and have
    /// room, and a client gets at most one free single session.
    async fn create_booking(&self, booking: &NewBooking) -> CoachResult<Booking>;
    async fn get_booking(&self, id: Uuid) -> CoachResult<Option<Booking>>;
    async fn list_bookings(&self, status: Option<BookingStatus>) -> CoachResult<Vec<Booking>>;
    async fn list_active_bookings_by_email(&self, email: &str) -> CoachResult<Vec<Booking>>;
    async fn list_active_bookings_between(&self, from: NaiveDate, to: NaiveDate) -> CoachResult<Vec<Booking>>;
    /// Moves a booking from `from` to `to`. Fails with `Conflict` when the
    /// stored status is no longer `from`.
    async fn update_booking_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> CoachResult<Option<Booking>>;
    async fn booking_status_counts(&self) -> CoachResult<Vec<(BookingStatus, i64)>>;

    // Packages

    async fn create_package(&self, input: &PackageInput) -> CoachResult<Package>;
    async fn get_package(&self, id: Uuid) -> CoachResult<Option<Package>>;
    async fn list_packages(&self) -> CoachResult<Vec<Package>>;
    async fn update_package(&self, id: Uuid, input: &PackageInput) -> CoachResult<Option<Package>>;
    async fn delete_package(&self, id: Uuid) -> CoachResult<bool>;
    async fn count_packages(&self) -> CoachResult<i64>;

    // Time slots

    async fn create_time_slot(&self, slot: &NewTimeSlot) -> CoachResult<TimeSlot>;
    async fn get_time_slot(&self, id: Uuid) -> CoachResult<Option<TimeSlot>>;
    async fn list_time_slots_between(&self, from: NaiveDate, to: NaiveDate) -> CoachResult<Vec<TimeSlot>>;
    async fn list_all_time_slots(&self) -> CoachResult<Vec<TimeSlot>>;
    async fn update_time_slot(&self, id: Uuid, changes: &TimeSlotChanges) -> CoachResult<Option<TimeSlot>>;
    async fn delete_time_slot(&self, id: Uuid) -> CoachResult<bool>;

    // Admins

    async fn get_admin_by_email(&self, email: &str) -> CoachResult<Option<Admin>>;
    async fn get_admin(&self, id: Uuid) -> CoachResult<Option<Admin>>;
    async fn create_admin(&self, email: &str, password_hash: &str) -> CoachResult<Admin>;
    async fn update_admin_password(&self, id: Uuid, password_hash: &str) -> CoachResult<bool>;
}

/// Turns unique-constraint violations into `Conflict` with `message`; every
/// other failure stays a database error.
pub fn conflict_or_database(report: eyre::Report, message: &str) -> CoachError {
    let unique = matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.is_unique_violation()
    );
    if unique {
        CoachError::Conflict(message.to_string())
    } else {
        CoachError::Database(report)
    }
}

fn booking_insert_error(report: eyre::Report) -> CoachError {
    let single = matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db)) if db.constraint() == Some(SINGLE_SESSION_INDEX)
    );
    if single {
        CoachError::Conflict(SINGLE_SESSION_USED.into())
    } else {
        conflict_or_database(report, "You already have a booking at this time")
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_booking(&self, booking: &NewBooking) -> CoachResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(eyre::Report::from)?;

        let slot = repositories::time_slot::lock_slot_at(&mut tx, booking.date, booking.time)
            .await?
            .map(TimeSlot::from);
        let active = repositories::booking::count_active_at(&mut tx, booking.date, booking.time).await?;
        ensure_bookable(slot.as_ref(), booking.time, active)?;

        if booking.package.is_some_and(|p| p.is_single())
            && repositories::booking::has_single_package_booking(&mut tx, &booking.email).await?
        {
            return Err(CoachError::Conflict(SINGLE_SESSION_USED.into()));
        }

        // A concurrent single booking on another slot is caught by the index
        let row = repositories::booking::insert_booking(&mut tx, booking)
            .await
            .map_err(booking_insert_error)?;
        tx.commit().await.map_err(eyre::Report::from)?;

        tracing::info!(
            "Booking created: id={}, date={}, time={}",
            row.id, row.date, row.time
        );
        Ok(row.into_booking()?)
    }

    async fn get_booking(&self, id: Uuid) -> CoachResult<Option<Booking>> {
        let row = repositories::booking::get_booking_by_id(&self.pool, id).await?;
        Ok(row.map(|r| r.into_booking()).transpose()?)
    }

    async fn list_bookings(&self, status: Option<BookingStatus>) -> CoachResult<Vec<Booking>> {
        let rows =
            repositories::booking::list_bookings(&self.pool, status.as_ref().map(BookingStatus::as_str))
                .await?;
        Ok(into_bookings(rows)?)
    }

    async fn list_active_bookings_by_email(&self, email: &str) -> CoachResult<Vec<Booking>> {
        let rows = repositories::booking::list_active_by_email(&self.pool, email).await?;
        Ok(into_bookings(rows)?)
    }

    async fn list_active_bookings_between(&self, from: NaiveDate, to: NaiveDate) -> CoachResult<Vec<Booking>> {
        let rows = repositories::booking::list_active_between(&self.pool, from, to).await?;
        Ok(into_bookings(rows)?)
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> CoachResult<Option<Booking>> {
        if let Some(row) = repositories::booking::update_status(&self.pool, id, from.as_str(), to.as_str()).await? {
            return Ok(Some(row.into_booking()?));
        }

        match self.get_booking(id).await? {
            Some(current) => Err(CoachError::Conflict(format!(
                "Booking status changed to {} in the meantime",
                current.status
            ))),
            None => Ok(None),
        }
    }

    async fn booking_status_counts(&self) -> CoachResult<Vec<(BookingStatus, i64)>> {
        repositories::booking::status_counts(&self.pool)
            .await?
            .into_iter()
            .map(|(status, count)| -> CoachResult<(BookingStatus, i64)> {
                Ok((status.parse()?, count))
            })
            .collect()
    }

    async fn create_package(&self, input: &PackageInput) -> CoachResult<Package> {
        let row = repositories::package::create_package(&self.pool, input).await?;
        Ok(row.into())
    }

    async fn get_package(&self, id: Uuid) -> CoachResult<Option<Package>> {
        let row = repositories::package::get_package_by_id(&self.pool, id).await?;
        Ok(row.map(Package::from))
    }

    async fn list_packages(&self) -> CoachResult<Vec<Package>> {
        let rows = repositories::package::list_packages(&self.pool).await?;
        Ok(rows.into_iter().map(Package::from).collect())
    }

    async fn update_package(&self, id: Uuid, input: &PackageInput) -> CoachResult<Option<Package>> {
        let row = repositories::package::update_package(&self.pool, id, input).await?;
        Ok(row.map(Package::from))
    }

    async fn delete_package(&self, id: Uuid) -> CoachResult<bool> {
        Ok(repositories::package::delete_package(&self.pool, id).await?)
    }

    async fn count_packages(&self) -> CoachResult<i64> {
        Ok(repositories::package::count_packages(&self.pool).await?)
    }

    async fn create_time_slot(&self, slot: &NewTimeSlot) -> CoachResult<TimeSlot> {
        let row = repositories::time_slot::create_time_slot(&self.pool, slot)
            .await
            .map_err(|e| conflict_or_database(e, "A time slot already starts at this date and time"))?;
        Ok(row.into())
    }

    async fn get_time_slot(&self, id: Uuid) -> CoachResult<Option<TimeSlot>> {
        let row = repositories::time_slot::get_time_slot_by_id(&self.pool, id).await?;
        Ok(row.map(TimeSlot::from))
    }

    async fn list_time_slots_between(&self, from: NaiveDate, to: NaiveDate) -> CoachResult<Vec<TimeSlot>> {
        let rows = repositories::time_slot::list_between(&self.pool, from, to).await?;
        Ok(rows.into_iter().map(TimeSlot::from).collect())
    }

    async fn list_all_time_slots(&self) -> CoachResult<Vec<TimeSlot>> {
        let rows = repositories::time_slot::list_all(&self.pool).await?;
        Ok(rows.into_iter().map(TimeSlot::from).collect())
    }

    async fn update_time_slot(&self, id: Uuid, changes: &TimeSlotChanges) -> CoachResult<Option<TimeSlot>> {
        let row = repositories::time_slot::update_time_slot(&self.pool, id, changes)
            .await
            .map_err(|e| conflict_or_database(e, "A time slot already starts at this date and time"))?;
        Ok(row.map(TimeSlot::from))
    }

    async fn delete_time_slot(&self, id: Uuid) -> CoachResult<bool> {
        Ok(repositories::time_slot::delete_time_slot(&self.pool, id).await?)
    }

    async fn get_admin_by_email(&self, email: &str) -> CoachResult<Option<Admin>> {
        let row = repositories::admin::get_admin_by_email(&self.pool, email).await?;
        Ok(row.map(Admin::from))
    }

    async fn get_admin(&self, id: Uuid) -> CoachResult<Option<Admin>> {
        let row = repositories::admin::get_admin_by_id(&self.pool, id).await?;
        Ok(row.map(Admin::from))
    }

    async fn create_admin(&self, email: &str, password_hash: &str) -> CoachResult<Admin> {
        let row = repositories::admin::create_admin(&self.pool, email, password_hash)
            .await
            .map_err(|e| conflict_or_database(e, "An admin with this email already exists"))?;
        Ok(row.into())
    }

    async fn update_admin_password(&self, id: Uuid, password_hash: &str) -> CoachResult<bool> {
        Ok(repositories::admin::update_password(&self.pool, id, password_hash).await?)
    }
}

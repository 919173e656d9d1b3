use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use coachbook_core::models::{
    admin::Admin,
    booking::{Booking, BookingPackage, BookingStatus},
    package::Package,
    time_slot::TimeSlot,
};
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAdmin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPackage {
    pub id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub session_count: i32,
    pub duration: String,
    pub features: Vec<String>,
    pub highlighted: bool,
    pub full_width: bool,
    pub badge: Option<String>,
    pub discount_percent: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub max_bookings: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: String,
    pub message: Option<String>,
    pub package: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbAdmin> for Admin {
    fn from(row: DbAdmin) -> Self {
        Admin {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

impl From<DbPackage> for Package {
    fn from(row: DbPackage) -> Self {
        Package {
            id: row.id,
            name: row.name,
            price_cents: row.price_cents,
            session_count: row.session_count,
            duration: row.duration,
            features: row.features,
            highlighted: row.highlighted,
            full_width: row.full_width,
            badge: row.badge,
            discount_percent: row.discount_percent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbTimeSlot> for TimeSlot {
    fn from(row: DbTimeSlot) -> Self {
        TimeSlot {
            id: row.id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
            max_bookings: row.max_bookings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl DbBooking {
    /// Converts the row into the domain type. Fails only if the row holds a
    /// status or package string the schema constraints should have rejected.
    pub fn into_booking(self) -> Result<Booking> {
        let status: BookingStatus = self
            .status
            .parse()
            .wrap_err_with(|| format!("Booking {} has an unknown status", self.id))?;
        let package: Option<BookingPackage> = self
            .package
            .as_deref()
            .map(str::parse)
            .transpose()
            .wrap_err_with(|| format!("Booking {} has an unknown package", self.id))?;

        Ok(Booking {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            date: self.date,
            time: self.time,
            status,
            message: self.message,
            package,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub fn into_bookings(rows: Vec<DbBooking>) -> Result<Vec<Booking>> {
    rows.into_iter().map(DbBooking::into_booking).collect()
}

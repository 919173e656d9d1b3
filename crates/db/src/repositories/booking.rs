use crate::models::DbBooking;
use chrono::{NaiveDate, NaiveTime, Utc};
use coachbook_core::models::booking::{BookingPackage, NewBooking};
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

const COLUMNS: &str =
    "id, name, email, phone, date, time, status, message, package, created_at, updated_at";

pub async fn insert_booking(conn: &mut PgConnection, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, email={}, date={}, time={}",
        id, booking.email, booking.date, booking.time
    );

    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO bookings (id, name, email, phone, date, time, status, message, package, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, 'PENDING', $7, $8, $9, $9)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&booking.name)
    .bind(&booking.email)
    .bind(&booking.phone)
    .bind(booking.date)
    .bind(booking.time)
    .bind(&booking.message)
    .bind(booking.package.as_ref().map(BookingPackage::as_str))
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row)
}

/// Active (pending or confirmed) bookings starting at `date` `time`.
pub async fn count_active_at(conn: &mut PgConnection, date: NaiveDate, time: NaiveTime) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM bookings
        WHERE date = $1 AND time = $2 AND status IN ('PENDING', 'CONFIRMED')
        "#,
    )
    .bind(date)
    .bind(time)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}

/// Whether `email` ever booked the free single session, whatever its status.
pub async fn has_single_package_booking(conn: &mut PgConnection, email: &str) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM bookings WHERE email = $1 AND package = 'single'
        )
        "#,
    )
    .bind(email)
    .fetch_one(&mut *conn)
    .await?;

    Ok(exists)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let row = sqlx::query_as::<_, DbBooking>(&format!(
        "SELECT {COLUMNS} FROM bookings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_bookings(pool: &Pool<Postgres>, status: Option<&str>) -> Result<Vec<DbBooking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM bookings
        WHERE $1::VARCHAR IS NULL OR status = $1
        ORDER BY date DESC, time DESC
        "#
    ))
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_active_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Vec<DbBooking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM bookings
        WHERE email = $1 AND status IN ('PENDING', 'CONFIRMED')
        ORDER BY date ASC, time ASC
        "#
    ))
    .bind(email)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Active bookings with `from <= date <= to`.
pub async fn list_active_between(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbBooking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM bookings
        WHERE date BETWEEN $1 AND $2 AND status IN ('PENDING', 'CONFIRMED')
        ORDER BY date ASC, time ASC
        "#
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Moves a booking from `from` to `to`. Returns `None` when the booking is
/// missing or no longer has status `from`.
pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    from: &str,
    to: &str,
) -> Result<Option<DbBooking>> {
    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE bookings
        SET status = $3, updated_at = $4
        WHERE id = $1 AND status = $2
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(from)
    .bind(to)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn status_counts(pool: &Pool<Postgres>) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT status, COUNT(*)
        FROM bookings
        GROUP BY status
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

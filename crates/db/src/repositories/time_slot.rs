use crate::models::DbTimeSlot;
use chrono::{NaiveDate, NaiveTime, Utc};
use coachbook_core::models::time_slot::{NewTimeSlot, TimeSlotChanges};
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

const COLUMNS: &str =
    "id, date, start_time, end_time, is_available, max_bookings, created_at, updated_at";

pub async fn create_time_slot(pool: &Pool<Postgres>, slot: &NewTimeSlot) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
        r#"
        INSERT INTO time_slots (id, date, start_time, end_time, is_available, max_bookings, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(slot.date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(slot.is_available)
    .bind(slot.max_bookings)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Inserts the slot unless one already starts at the same date and time.
/// Returns whether a row was written.
pub async fn insert_if_absent(pool: &Pool<Postgres>, slot: &NewTimeSlot) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO time_slots (id, date, start_time, end_time, is_available, max_bookings)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (date, start_time) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(slot.date)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(slot.is_available)
    .bind(slot.max_bookings)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Locks the slot starting at `date` `time` for the rest of the transaction.
pub async fn lock_slot_at(
    conn: &mut PgConnection,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<Option<DbTimeSlot>> {
    let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM time_slots
        WHERE date = $1 AND start_time = $2
        FOR UPDATE
        "#
    ))
    .bind(date)
    .bind(time)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
        "SELECT {COLUMNS} FROM time_slots WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_between(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbTimeSlot>> {
    let rows = sqlx::query_as::<_, DbTimeSlot>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM time_slots
        WHERE date BETWEEN $1 AND $2
        ORDER BY date ASC, start_time ASC
        "#
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_all(pool: &Pool<Postgres>) -> Result<Vec<DbTimeSlot>> {
    let rows = sqlx::query_as::<_, DbTimeSlot>(&format!(
        "SELECT {COLUMNS} FROM time_slots ORDER BY date ASC, start_time ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_time_slot(
    pool: &Pool<Postgres>,
    id: Uuid,
    changes: &TimeSlotChanges,
) -> Result<Option<DbTimeSlot>> {
    let row = sqlx::query_as::<_, DbTimeSlot>(&format!(
        r#"
        UPDATE time_slots
        SET start_time = $2, end_time = $3, is_available = $4, max_bookings = $5, updated_at = $6
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(changes.start_time)
    .bind(changes.end_time)
    .bind(changes.is_available)
    .bind(changes.max_bookings)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_time_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM time_slots WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

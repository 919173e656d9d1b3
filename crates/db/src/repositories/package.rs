use crate::models::DbPackage;
use chrono::Utc;
use coachbook_core::models::package::PackageInput;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const COLUMNS: &str = "id, name, price_cents, session_count, duration, features, highlighted, \
                       full_width, badge, discount_percent, created_at, updated_at";

pub async fn create_package(pool: &Pool<Postgres>, input: &PackageInput) -> Result<DbPackage> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating package: id={}, name={}", id, input.name);

    let row = sqlx::query_as::<_, DbPackage>(&format!(
        r#"
        INSERT INTO packages (id, name, price_cents, session_count, duration, features,
                              highlighted, full_width, badge, discount_percent, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&input.name)
    .bind(input.price_cents)
    .bind(input.session_count)
    .bind(&input.duration)
    .bind(&input.features)
    .bind(input.highlighted)
    .bind(input.full_width)
    .bind(&input.badge)
    .bind(input.discount_percent)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_package_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPackage>> {
    let row = sqlx::query_as::<_, DbPackage>(&format!(
        "SELECT {COLUMNS} FROM packages WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_packages(pool: &Pool<Postgres>) -> Result<Vec<DbPackage>> {
    let rows = sqlx::query_as::<_, DbPackage>(&format!(
        "SELECT {COLUMNS} FROM packages ORDER BY price_cents ASC, name ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_package(
    pool: &Pool<Postgres>,
    id: Uuid,
    input: &PackageInput,
) -> Result<Option<DbPackage>> {
    let row = sqlx::query_as::<_, DbPackage>(&format!(
        r#"
        UPDATE packages
        SET name = $2, price_cents = $3, session_count = $4, duration = $5, features = $6,
            highlighted = $7, full_width = $8, badge = $9, discount_percent = $10, updated_at = $11
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&input.name)
    .bind(input.price_cents)
    .bind(input.session_count)
    .bind(&input.duration)
    .bind(&input.features)
    .bind(input.highlighted)
    .bind(input.full_width)
    .bind(&input.badge)
    .bind(input.discount_percent)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_package(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM packages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_packages(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM packages")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

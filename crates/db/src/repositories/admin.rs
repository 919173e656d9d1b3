use crate::models::DbAdmin;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_admin(pool: &Pool<Postgres>, email: &str, password_hash: &str) -> Result<DbAdmin> {
    let row = sqlx::query_as::<_, DbAdmin>(
        r#"
        INSERT INTO admins (id, email, password_hash, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, password_hash, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_admin_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbAdmin>> {
    let row = sqlx::query_as::<_, DbAdmin>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM admins
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_admin_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAdmin>> {
    let row = sqlx::query_as::<_, DbAdmin>(
        r#"
        SELECT id, email, password_hash, created_at
        FROM admins
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_password(pool: &Pool<Postgres>, id: Uuid, password_hash: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

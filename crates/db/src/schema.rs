use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

/// Partial unique index that allows one free single session per email.
pub const SINGLE_SESSION_INDEX: &str = "unique_single_per_email";

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create admins table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create packages table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS packages (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            price_cents BIGINT NOT NULL CHECK (price_cents >= 0),
            session_count INTEGER NOT NULL CHECK (session_count >= 1),
            duration VARCHAR(255) NOT NULL,
            features TEXT[] NOT NULL DEFAULT '{}',
            highlighted BOOLEAN NOT NULL DEFAULT FALSE,
            full_width BOOLEAN NOT NULL DEFAULT FALSE,
            badge VARCHAR(255) NULL,
            discount_percent INTEGER NOT NULL DEFAULT 0 CHECK (discount_percent BETWEEN 0 AND 100),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            max_bookings INTEGER NOT NULL DEFAULT 1 CHECK (max_bookings >= 1),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_range CHECK (end_time > start_time),
            CONSTRAINT unique_slot_start UNIQUE (date, start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NULL,
            date DATE NOT NULL,
            time TIME NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'PENDING'
                CHECK (status IN ('PENDING', 'CONFIRMED', 'CANCELLED', 'COMPLETED', 'NO_SHOW')),
            message TEXT NULL,
            package VARCHAR(16) NULL
                CHECK (package IN ('single', 'pack3', 'pack5', 'pack10', 'unlimited', 'premium')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_client_booking UNIQUE (email, date, time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes. Several statements, so this goes through the simple
    // query protocol rather than a prepared statement.
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bookings_date_time ON bookings(date, time);
        CREATE INDEX IF NOT EXISTS idx_bookings_email ON bookings(email);
        CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status);
        CREATE INDEX IF NOT EXISTS idx_time_slots_date ON time_slots(date);
        CREATE INDEX IF NOT EXISTS idx_packages_price ON packages(price_cents);
        CREATE UNIQUE INDEX IF NOT EXISTS unique_single_per_email ON bookings(email) WHERE package = 'single';
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

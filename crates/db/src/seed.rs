//! Initial data for a fresh installation: the admin account, a starter set
//! of packages and dated slots from the default weekly template.
//!
//! Every step is idempotent so the seeder can run on each deploy.

use chrono::NaiveDate;
use coachbook_core::{models::package::PackageInput, template};
use eyre::Result;
use tracing::info;

use crate::{repositories, DbPool};

/// Creates the admin account unless one already exists with that email.
/// Returns whether a new account was written.
pub async fn seed_admin(pool: &DbPool, email: &str, password_hash: &str) -> Result<bool> {
    if repositories::admin::get_admin_by_email(pool, email).await?.is_some() {
        info!("Admin {} already exists, skipping", email);
        return Ok(false);
    }

    repositories::admin::create_admin(pool, email, password_hash).await?;
    info!("Admin {} created", email);
    Ok(true)
}

pub fn default_packages() -> Vec<PackageInput> {
    let package = |name: &str, price_cents: i64, session_count: i32, features: &[&str]| PackageInput {
        name: name.to_string(),
        price_cents,
        session_count,
        duration: "60 min".to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        highlighted: false,
        full_width: false,
        badge: None,
        discount_percent: 0,
    };

    vec![
        PackageInput {
            duration: "40 min".to_string(),
            badge: Some("Free".to_string()),
            ..package("Discovery session", 0, 1, &["Get to know each other", "Define your goals"])
        },
        package("Single session", 7_000, 1, &["Personalised coaching", "Session summary"]),
        PackageInput {
            highlighted: true,
            badge: Some("Popular".to_string()),
            discount_percent: 10,
            ..package("Pack 5", 35_000, 5, &["Personalised coaching", "Email follow-up"])
        },
        PackageInput {
            full_width: true,
            discount_percent: 15,
            ..package("Pack 10", 70_000, 10, &["Personalised coaching", "Email follow-up", "Progress review"])
        },
    ]
}

/// Inserts the default packages when the table is empty.
pub async fn seed_packages(pool: &DbPool) -> Result<usize> {
    if repositories::package::count_packages(pool).await? > 0 {
        info!("Packages already present, skipping");
        return Ok(0);
    }

    let packages = default_packages();
    for input in &packages {
        repositories::package::create_package(pool, input).await?;
    }
    info!("Seeded {} packages", packages.len());
    Ok(packages.len())
}

/// Writes template slots for `weeks` weeks from `from`, leaving existing
/// slots untouched. Returns the number of new slots.
pub async fn seed_time_slots(pool: &DbPool, from: NaiveDate, weeks: u32) -> Result<usize> {
    let mut created = 0;
    for slot in template::expand(from, weeks) {
        if repositories::time_slot::insert_if_absent(pool, &slot).await? {
            created += 1;
        }
    }
    info!("Seeded {} time slots over {} weeks from {}", created, weeks, from);
    Ok(created)
}

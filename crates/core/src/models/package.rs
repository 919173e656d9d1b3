use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoachError, CoachResult};
use crate::validation;

/// Upper bound for a package price, in cents.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// A purchasable coaching offer shown on the pricing page.
///
/// Prices are stored in cents. `discount_percent` is applied on top of
/// `price_cents` when the package is displayed or sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
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

impl Package {
    pub fn effective_price_cents(&self) -> i64 {
        discounted(self.price_cents, self.discount_percent)
    }

    pub fn price_per_session_cents(&self) -> i64 {
        let sessions = i64::from(self.session_count.max(1));
        (self.effective_price_cents() + sessions / 2) / sessions
    }
}

/// Rounds half-up to the nearest cent. Saturates instead of overflowing for
/// prices above `MAX_PRICE_CENTS` that bypassed validation.
fn discounted(price_cents: i64, discount_percent: i32) -> i64 {
    let keep = i64::from(100 - discount_percent.clamp(0, 100));
    price_cents.saturating_mul(keep).saturating_add(50) / 100
}

/// A package as shown on the pricing page, with the computed prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageView {
    #[serde(flatten)]
    pub package: Package,
    pub effective_price_cents: i64,
    pub price_per_session_cents: i64,
}

impl From<Package> for PackageView {
    fn from(package: Package) -> Self {
        PackageView {
            effective_price_cents: package.effective_price_cents(),
            price_per_session_cents: package.price_per_session_cents(),
            package,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInput {
    pub name: String,
    pub price_cents: i64,
    pub session_count: i32,
    pub duration: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub full_width: bool,
    pub badge: Option<String>,
    #[serde(default)]
    pub discount_percent: i32,
}

impl PackageInput {
    /// Returns a trimmed copy or the first rule the input breaks.
    pub fn validate(&self) -> CoachResult<PackageInput> {
        if self.price_cents < 0 {
            return Err(CoachError::validation("Price cannot be negative"));
        }
        if self.price_cents > MAX_PRICE_CENTS {
            return Err(CoachError::validation(format!(
                "Price cannot exceed {MAX_PRICE_CENTS} cents"
            )));
        }
        if self.session_count < 1 {
            return Err(CoachError::validation("Session count must be at least 1"));
        }
        if !(0..=100).contains(&self.discount_percent) {
            return Err(CoachError::validation("Discount must be between 0 and 100"));
        }

        Ok(PackageInput {
            name: validation::required("Package name", &self.name)?,
            price_cents: self.price_cents,
            session_count: self.session_count,
            duration: validation::required("Duration", &self.duration)?,
            features: self
                .features
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect(),
            highlighted: self.highlighted,
            full_width: self.full_width,
            badge: validation::optional(self.badge.clone()),
            discount_percent: self.discount_percent,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub session_count: Option<i32>,
    pub duration: Option<String>,
    pub features: Option<Vec<String>>,
    pub highlighted: Option<bool>,
    pub full_width: Option<bool>,
    pub badge: Option<String>,
    pub discount_percent: Option<i32>,
}

impl UpdatePackageRequest {
    /// Merges the provided fields over `current` and validates the result.
    pub fn apply_to(&self, current: &Package) -> CoachResult<PackageInput> {
        PackageInput {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            price_cents: self.price_cents.unwrap_or(current.price_cents),
            session_count: self.session_count.unwrap_or(current.session_count),
            duration: self
                .duration
                .clone()
                .unwrap_or_else(|| current.duration.clone()),
            features: self
                .features
                .clone()
                .unwrap_or_else(|| current.features.clone()),
            highlighted: self.highlighted.unwrap_or(current.highlighted),
            full_width: self.full_width.unwrap_or(current.full_width),
            badge: self.badge.clone().or_else(|| current.badge.clone()),
            discount_percent: self.discount_percent.unwrap_or(current.discount_percent),
        }
        .validate()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::booking::BookingStatus;
use crate::errors::{CoachError, CoachResult};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        AdminProfile {
            id: admin.id,
            email: admin.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    /// Checks the shape of the new password. Reuse of the current password is
    /// checked against the stored hash by the caller.
    pub fn validate(&self) -> CoachResult<()> {
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoachError::validation(format!(
                "New password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.new_password == self.current_password {
            return Err(CoachError::validation(
                "New password must be different from the current one",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_packages: i64,
    pub total_bookings: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub cancelled: i64,
    pub completed: i64,
    pub no_show: i64,
}

impl DashboardStats {
    pub fn from_counts(total_packages: i64, counts: &[(BookingStatus, i64)]) -> Self {
        let mut stats = DashboardStats {
            total_packages,
            ..Default::default()
        };
        for (status, count) in counts {
            stats.total_bookings += count;
            let bucket = match status {
                BookingStatus::Pending => &mut stats.pending,
                BookingStatus::Confirmed => &mut stats.confirmed,
                BookingStatus::Cancelled => &mut stats.cancelled,
                BookingStatus::Completed => &mut stats.completed,
                BookingStatus::NoShow => &mut stats.no_show,
            };
            *bucket += count;
        }
        stats
    }
}

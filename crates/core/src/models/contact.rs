use serde::{Deserialize, Serialize};

use crate::errors::CoachResult;
use crate::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> CoachResult<ContactMessage> {
        Ok(ContactMessage {
            name: validation::required("Name", &self.name)?,
            email: validation::normalize_email(&self.email)?,
            phone: validation::optional(self.phone.clone()),
            message: validation::required("Message", &self.message)?,
        })
    }

    /// Text forwarded to the business owner.
    pub fn relay_text(&self) -> String {
        format!(
            "New message from the website:\n\nName: {}\nEmail: {}\nPhone: {}\nMessage:\n{}",
            self.name,
            self.email,
            self.phone.as_deref().unwrap_or("-"),
            self.message,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
}

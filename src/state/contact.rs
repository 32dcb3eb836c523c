//! Contact form submissions

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const CONTACT_ACK: &str = "Message sent! We will get back to you soon.";

/// "Didn't find your photo?" form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Trim all fields and reject blank or malformed input
    pub fn validate(self) -> AppResult<Self> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        require("name", &form.name)?;
        require("email", &form.email)?;
        require("message", &form.message)?;

        match form.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(form),
            _ => Err(AppError::Validation {
                field: "email",
                reason: format!("'{}' is not an email address", form.email),
            }),
        }
    }
}

fn require(field: &'static str, value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::Validation {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

//! Contact form submission.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

static EMAIL_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// One of the four contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// Sender name.
    Name,
    /// Sender email.
    Email,
    /// Message subject.
    Subject,
    /// Message body.
    Message,
}

impl ContactField {
    /// All fields, in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Field label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-entered contact message, posted to `/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactSubmission {
    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Replaces the value of a field.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Returns true when every field is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    /// Resets every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks that all fields are filled and the email has an address shape.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for the first blank field in form order, or
    /// `InvalidEmail` when the email is malformed.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(field) = ContactField::ALL
            .into_iter()
            .find(|field| self.get(*field).trim().is_empty())
        {
            return Err(DomainError::MissingField(field));
        }

        let email = self.email.trim();
        let well_formed = EMAIL_SHAPE
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(email));
        if !well_formed {
            return Err(DomainError::InvalidEmail(email.to_string()));
        }

        Ok(())
    }
}

/// Acknowledgement returned by a successful `/contact` post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAcknowledgement {
    /// Whether the server accepted the message.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Optional message from the server.
    #[serde(default)]
    pub message: Option<String>,
}

const fn default_success() -> bool {
    true
}

impl Default for ContactAcknowledgement {
    fn default() -> Self {
        Self {
            success: default_success(),
            message: None,
        }
    }
}

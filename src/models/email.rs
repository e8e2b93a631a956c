use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Body of a `send-email` request.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as an incomplete payload rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl EmailPayload {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: Some(to.into()),
            subject: Some(subject.into()),
            html: Some(html.into()),
            from: None,
        }
    }

    /// Check required fields and resolve the sender address.
    pub fn validate(self, default_from: &str) -> Result<OutgoingEmail> {
        let incomplete = || AppError::BadRequest("Données d'email incomplètes".to_string());

        let to = required(self.to).ok_or_else(incomplete)?;
        let subject = required(self.subject).ok_or_else(incomplete)?;
        let html = required(self.html).ok_or_else(incomplete)?;
        let from = required(self.from).unwrap_or_else(|| default_from.to_string());

        Ok(OutgoingEmail {
            from,
            to,
            subject,
            html,
        })
    }
}

/// Present and not blank
pub(crate) fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

/// A validated message ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Success body shared by both relays
#[derive(Debug, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    pub message: String,
}

impl RelayResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

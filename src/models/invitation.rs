use serde::{Deserialize, Serialize};

use super::email::required;
use crate::error::{AppError, Result};

/// Body of a `send-invitation-email` request.
///
/// The invitation row itself is created elsewhere; this is only the copy
/// the caller sends along.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invitation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub invited_by: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// An invitation with every required field present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidInvitation {
    pub id: Option<String>,
    pub email: String,
    pub team_id: String,
    pub invited_by: String,
    pub team_name: String,
    pub token: String,
}

impl Invitation {
    pub fn validate(self) -> Result<ValidInvitation> {
        let incomplete = || AppError::BadRequest("Données d'invitation incomplètes".to_string());

        Ok(ValidInvitation {
            email: required(self.email).ok_or_else(incomplete)?,
            team_id: required(self.team_id).ok_or_else(incomplete)?,
            invited_by: required(self.invited_by).ok_or_else(incomplete)?,
            team_name: required(self.team_name).ok_or_else(incomplete)?,
            token: required(self.token).ok_or_else(incomplete)?,
            id: self.id,
        })
    }
}

/// Inviter profile as stored in the `profiles` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

pub const FALLBACK_INVITER_NAME: &str = "Un membre";

impl Profile {
    /// Display name, else email, else a generic fallback
    pub fn inviter_name(&self) -> String {
        required(self.display_name.clone())
            .or_else(|| required(self.email.clone()))
            .unwrap_or_else(|| FALLBACK_INVITER_NAME.to_string())
    }
}

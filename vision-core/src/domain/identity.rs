//! Identity and Session
//!
//! A session is created on successful sign-in and torn down on sign-out.
//! It is passed explicitly to whoever needs it; nothing here is global.

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Free-form metadata attached at sign-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// The authenticated user as reported by the identity service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl Identity {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            user_metadata: UserMetadata::default(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.user_metadata.full_name = Some(full_name.into());
        self
    }

    /// Metadata full name, else email, else the raw user id
    pub fn display_name(&self) -> String {
        self.user_metadata
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or(self.email.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Signed-in session: identity plus the bearer token for row/blob access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: Identity,
}

impl Session {
    pub fn display_name(&self) -> String {
        self.user.display_name()
    }
}

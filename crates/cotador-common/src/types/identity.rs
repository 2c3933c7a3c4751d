//! Identities consumed from the outside: contacts on a proposal and the
//! logged-in user supplied by the auth provider.

use crate::error::CotadorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Name, email, and phone of a client or account manager
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: String::new(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Name is present (not blank after trimming)
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Email is present (not blank after trimming)
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

/// Role of a logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Diretor,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Diretor => "diretor",
            UserRole::User => "user",
        }
    }

    /// Admins and directors list every proposal; users only their own
    pub fn can_view_all_proposals(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Diretor)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CotadorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "diretor" => Ok(UserRole::Diretor),
            "user" => Ok(UserRole::User),
            other => Err(CotadorError::Config(format!("Unknown user role: {}", other))),
        }
    }
}

/// The current user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
        }
    }
}

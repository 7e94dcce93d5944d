//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp};

use crate::{auth::AuthServiceError, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Session marker
#[derive(Debug)]
pub struct Session;

/// Session UUID
pub type SessionUuid = TypedUuid<Session>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AuthServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(AuthServiceError::UnknownRole(value.to_string())),
        }
    }
}

/// A user as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored user row, including the argon2 PHC string.
#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Sign-up / sign-in credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Session persistence payload.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// A freshly issued session; `token` is only ever returned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
    pub expires_at: Timestamp,
}

/// How long issued sessions stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub ttl: SignedDuration,
}

impl SessionPolicy {
    pub const DEFAULT_TTL_HOURS: u32 = 168;

    #[must_use]
    pub fn from_hours(hours: u32) -> Self {
        Self {
            ttl: SignedDuration::from_hours(i64::from(hours)),
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::from_hours(Self::DEFAULT_TTL_HOURS)
    }
}

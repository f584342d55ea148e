use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Payload of a Jobly token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    pub is_admin: bool,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, is_admin: bool, issued_at: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            username: username.into(),
            is_admin,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn require_admin(&self) -> Result<(), crate::AuthError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(crate::AuthError::NotAdmin(self.username.clone()))
        }
    }
}

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Claim set embedded in every identity token.
///
/// Immutable once signed; verification trusts the embedded role until the
/// token expires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Numeric user identifier
    #[serde(rename = "userId")]
    pub user_id: i64,

    pub email: String,

    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl IdentityClaims {
    /// Create claims issued now and expiring after `ttl`.
    pub fn for_user(user_id: i64, email: impl Into<String>, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            email: email.into(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Replace the validity window (Unix timestamps).
    pub fn with_window(mut self, iat: i64, exp: i64) -> Self {
        self.iat = iat;
        self.exp = exp;
        self
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

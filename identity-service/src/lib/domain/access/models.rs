use std::time::Duration;

use auth::IdentityClaims;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::user::models::UserId;

/// Identity resolved from a verified bearer token.
///
/// Lives in the extensions of exactly one request and is dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl From<IdentityClaims> for RequestIdentity {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            user_id: UserId(claims.user_id),
            email: claims.email,
            role: claims.role,
        }
    }
}

/// What the gate can see of the request it is observing.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub path: String,
    pub identity: Option<RequestIdentity>,
}

/// Audit record of one gated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub requested_at: DateTime<Utc>,
    pub user_id: Option<UserId>,
    pub path: String,
    pub duration: Duration,
}

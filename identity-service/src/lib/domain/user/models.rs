use std::fmt;

use auth::Role;

use crate::user::errors::EmailError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `password_hash` is an opaque PHC digest and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
}

/// User unique identifier type, assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Case-sensitive; the only structural requirement is that it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address.
    ///
    /// # Errors
    /// * `Missing` - Email is empty
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            Err(EmailError::Missing)
        } else {
            Ok(Self(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User record before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
}

/// Raw signup credentials as received from a client.
///
/// Validation happens inside the signup flow so that nothing reaches storage
/// before the fields are checked.
#[derive(Debug, Clone, Default)]
pub struct SignupCommand {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Raw sign-in credentials as received from a client.
#[derive(Debug, Clone, Default)]
pub struct SigninCommand {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Command to replace the caller's password.
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub old_password: String,
    pub new_password: String,
}

/// Command to change another user's role. The label is parsed by the service.
#[derive(Debug, Clone)]
pub struct ChangeRoleCommand {
    pub role: String,
}

/// Extract a required, non-empty credential field.
pub(crate) fn required_email(email: Option<String>) -> Result<EmailAddress, UserError> {
    Ok(EmailAddress::new(email.unwrap_or_default())?)
}

pub(crate) fn required_password(password: Option<String>) -> Result<String, UserError> {
    password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| UserError::MissingField(UserError::PASSWORD_REQUIRED.to_string()))
}

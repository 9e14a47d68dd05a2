use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Role carried by every user and embedded in identity tokens.
///
/// Serialized as the upper-case label (`"USER"`, `"ADMIN"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Error for role label parsing failures.
///
/// The rejected label is kept for logging but not shown to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("유효하지 않은 UserRole")]
pub struct RoleParseError(pub String);

impl Role {
    /// Upper-case label used on the wire and in storage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Resolve a requested role label, falling back to `User` when the label
    /// is absent or not recognised.
    pub fn from_label_or_default(label: Option<&str>) -> Self {
        label.and_then(|l| l.parse().ok()).unwrap_or_default()
    }

    /// Whether a caller holding this role may invoke an operation that
    /// requires `required`.
    pub const fn satisfies(&self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::User, Role::User) => true,
            (Role::User, Role::Admin) => false,
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use auth::PasswordError;
use auth::PasswordPolicyError;
use auth::RoleParseError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("이메일이 필요합니다.")]
    Missing,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    /// A required credential field was absent or empty.
    #[error("{0}")]
    MissingField(String),

    #[error(transparent)]
    PolicyViolation(#[from] PasswordPolicyError),

    #[error("새 비밀번호는 기존 비밀번호와 같을 수 없습니다.")]
    PasswordUnchanged,

    #[error(transparent)]
    InvalidRole(#[from] RoleParseError),

    #[error("User not found")]
    NotFound(String),

    #[error("가입되지 않은 유저입니다.")]
    NotFoundByEmail(String),

    #[error("이미 존재하는 이메일입니다.")]
    EmailAlreadyExists(String),

    #[error("잘못된 비밀번호입니다.")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    pub const EMAIL_REQUIRED: &'static str = "이메일이 필요합니다.";
    pub const PASSWORD_REQUIRED: &'static str = "비밀번호가 필요합니다.";
}

impl From<EmailError> for UserError {
    fn from(err: EmailError) -> Self {
        UserError::MissingField(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

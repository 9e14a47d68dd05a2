use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// Rejection produced by the password policy.
///
/// Always carries the same message regardless of which rule failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", PasswordPolicyError::MESSAGE)]
pub struct PasswordPolicyError;

impl PasswordPolicyError {
    pub const MESSAGE: &'static str =
        "새 비밀번호는 8자 이상이어야 하고, 숫자와 대문자를 포함해야 합니다.";
}

use thiserror::Error;

/// Error type for JWT operations.
///
/// `Malformed` and `Expired` stay distinct so callers can tell a bad token
/// from one that only needs a fresh login.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,
}

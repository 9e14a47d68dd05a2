use auth::Role;
use thiserror::Error;

/// Access-control rejections.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// No identity was attached to the request.
    #[error("Forbidden: requires {required} role, caller is unauthenticated")]
    Unauthenticated { required: Role },

    /// The caller's role does not satisfy the requirement.
    #[error("Forbidden: requires {required} role")]
    Forbidden { required: Role },
}

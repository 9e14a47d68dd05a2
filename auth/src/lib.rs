//! Identity primitives shared by the service crates:
//! - Password hashing (Argon2id) and the new-password policy
//! - Signed identity tokens (HS256 JWT) carrying user id, email and role
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Password Policy
//! ```
//! use auth::PasswordPolicy;
//!
//! let policy = PasswordPolicy::new();
//! assert!(policy.validate("Valid1Password").is_ok());
//! assert!(policy.validate("password1").is_err());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::{Role, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(60));
//! let token = tokens.issue(1, "alice@example.com", Role::Admin).unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.user_id, 1);
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod jwt;
pub mod password;
pub mod role;
pub mod token_service;

pub use jwt::IdentityClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordPolicyError;
pub use role::Role;
pub use role::RoleParseError;
pub use token_service::TokenService;

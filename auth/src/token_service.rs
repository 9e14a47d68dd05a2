use chrono::Duration;
use chrono::Utc;

use crate::jwt::IdentityClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::role::Role;

/// Issues and verifies identity tokens.
///
/// Holds the process-wide signing secret and token lifetime. Construct it once
/// at startup and share it behind an `Arc`.
pub struct TokenService {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Secret key for HS256 signing
    /// * `ttl` - Lifetime of every issued token
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            ttl,
        }
    }

    /// Lifetime applied to newly issued tokens.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for a user, valid from now until now + TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue(&self, user_id: i64, email: &str, role: Role) -> Result<String, JwtError> {
        let claims = IdentityClaims::for_user(user_id, email, role, self.ttl);
        self.sign(&claims)
    }

    /// Sign an explicit claim set.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn sign(&self, claims: &IdentityClaims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Verify a token and return its claims.
    ///
    /// Pure check of signature then expiry; no storage lookup, so a role
    /// change is only reflected in tokens issued afterwards.
    ///
    /// # Errors
    /// * `Malformed` - Signature mismatch or undecodable token
    /// * `Expired` - Token is past its expiry
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, JwtError> {
        let claims: IdentityClaims = self.jwt_handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

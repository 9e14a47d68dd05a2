use super::errors::PasswordPolicyError;

/// Structural rules for new passwords: at least 8 characters, one ASCII digit
/// and one ASCII upper-case letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    const MIN_LENGTH: usize = 8;

    pub fn new() -> Self {
        Self
    }

    /// Check a candidate password against every rule.
    ///
    /// # Errors
    /// * `PasswordPolicyError` - Any rule failed (single combined message)
    pub fn validate(&self, candidate: &str) -> Result<(), PasswordPolicyError> {
        let long_enough = candidate.chars().count() >= Self::MIN_LENGTH;
        let has_digit = candidate.chars().any(|c| c.is_ascii_digit());
        let has_uppercase = candidate.chars().any(|c| c.is_ascii_uppercase());

        if long_enough && has_digit && has_uppercase {
            Ok(())
        } else {
            Err(PasswordPolicyError)
        }
    }
}

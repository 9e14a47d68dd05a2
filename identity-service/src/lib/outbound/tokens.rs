use auth::Role;
use auth::TokenService;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::TokenIssuer;
use crate::user::errors::UserError;

impl TokenIssuer for TokenService {
    fn issue(&self, user_id: UserId, email: &EmailAddress, role: Role) -> Result<String, UserError> {
        TokenService::issue(self, user_id.0, email.as_str(), role)
            .map_err(|e| UserError::TokenIssuance(e.to_string()))
    }
}

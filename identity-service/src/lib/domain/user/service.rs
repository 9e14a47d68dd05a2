use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::PasswordPolicy;
use auth::Role;

use crate::domain::user::models::required_email;
use crate::domain::user::models::required_password;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::ChangeRoleCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SigninCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::TokenIssuer;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, TI>
where
    UR: UserRepository,
    TI: TokenIssuer,
{
    repository: Arc<UR>,
    token_issuer: Arc<TI>,
    password_hasher: PasswordHasher,
    password_policy: PasswordPolicy,
}

impl<UR, TI> UserService<UR, TI>
where
    UR: UserRepository,
    TI: TokenIssuer,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_issuer` - Identity token issuance
    pub fn new(repository: Arc<UR>, token_issuer: Arc<TI>) -> Self {
        Self {
            repository,
            token_issuer,
            password_hasher: PasswordHasher::new(),
            password_policy: PasswordPolicy::new(),
        }
    }

    async fn load_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR, TI> UserServicePort for UserService<UR, TI>
where
    UR: UserRepository,
    TI: TokenIssuer,
{
    async fn signup(&self, command: SignupCommand) -> Result<String, UserError> {
        let email = required_email(command.email)?;
        let password = required_password(command.password)?;

        if self.repository.exists_by_email(&email).await? {
            return Err(UserError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&password)?;
        let role = Role::from_label_or_default(command.role.as_deref());

        let user = self
            .repository
            .create(NewUser {
                email,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User signed up");

        // No rollback: the stored user survives a signing failure.
        self.token_issuer
            .issue(user.id, &user.email, user.role)
            .inspect_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Token issuance failed after signup");
            })
    }

    async fn signin(&self, command: SigninCommand) -> Result<String, UserError> {
        let email = required_email(command.email)?;
        let password = required_password(command.password)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))?;

        if !self.password_hasher.verify(&password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "Sign-in rejected: password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        self.token_issuer.issue(user.id, &user.email, user.role)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.load_user(id).await
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        self.password_policy.validate(&command.new_password)?;

        let mut user = self.load_user(id).await?;

        if self
            .password_hasher
            .verify(&command.new_password, &user.password_hash)
        {
            return Err(UserError::PasswordUnchanged);
        }

        if !self
            .password_hasher
            .verify(&command.old_password, &user.password_hash)
        {
            return Err(UserError::InvalidCredentials);
        }

        user.password_hash = self.password_hasher.hash(&command.new_password)?;
        self.repository.update(user).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    async fn change_user_role(
        &self,
        id: &UserId,
        command: ChangeRoleCommand,
    ) -> Result<User, UserError> {
        let role: Role = command.role.parse()?;

        let mut user = self.load_user(id).await?;
        let previous = user.role;
        user.role = role;

        let updated_user = self.repository.update(user).await?;

        tracing::info!(
            user_id = %id,
            from = %previous,
            to = %updated_user.role,
            "User role changed"
        );

        Ok(updated_user)
    }
}

use async_trait::async_trait;
use auth::Role;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::ChangeRoleCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SigninCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue an identity token for it.
    ///
    /// Steps run strictly in order: field validation, email uniqueness,
    /// password hashing, persistence, token issuance.
    ///
    /// # Returns
    /// Signed identity token
    ///
    /// # Errors
    /// * `MissingField` - Email or password absent/empty
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `TokenIssuance` - Token could not be signed (the stored user is kept)
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<String, UserError>;

    /// Verify credentials and issue an identity token.
    ///
    /// # Errors
    /// * `MissingField` - Email or password absent/empty
    /// * `NotFoundByEmail` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    async fn signin(&self, command: SigninCommand) -> Result<String, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Replace a user's password after checking the policy and the old password.
    ///
    /// # Errors
    /// * `PolicyViolation` - New password fails the password policy
    /// * `NotFound` - User does not exist
    /// * `PasswordUnchanged` - New password equals the current one
    /// * `InvalidCredentials` - Old password does not match
    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError>;

    /// Change a user's role. Only reachable through privileged routes.
    ///
    /// # Errors
    /// * `InvalidRole` - Role label is not recognised
    /// * `NotFound` - User does not exist
    async fn change_user_role(
        &self,
        id: &UserId,
        command: ChangeRoleCommand,
    ) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage; storage assigns the id.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Whether a user with this exact email exists.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}

/// Issues identity tokens for persisted users.
pub trait TokenIssuer: Send + Sync + 'static {
    /// # Errors
    /// * `TokenIssuance` - Token could not be signed
    fn issue(&self, user_id: UserId, email: &EmailAddress, role: Role) -> Result<String, UserError>;
}

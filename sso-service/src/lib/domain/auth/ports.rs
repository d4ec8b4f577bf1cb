use async_trait::async_trait;

use crate::domain::auth::context::RequestContext;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::events::AuthEvent;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication operations exposed to inbound adapters.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token for an application.
    ///
    /// # Arguments
    /// * `ctx` - Request context (correlation id, cancellation, deadline)
    /// * `command` - Email, password and target application
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidAppId` - Application does not exist
    /// * `Internal` - Storage, signing or cancellation failure
    async fn login(&self, ctx: &RequestContext, command: LoginCommand)
        -> Result<String, AuthError>;

    /// Register a new user with a hashed password.
    ///
    /// # Arguments
    /// * `ctx` - Request context
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Identifier assigned by storage
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Internal` - Hashing, storage or cancellation failure
    async fn register(
        &self,
        ctx: &RequestContext,
        command: RegisterCommand,
    ) -> Result<UserId, AuthError>;

    /// Check whether a user has admin privileges.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `Internal` - Storage or cancellation failure
    async fn is_admin(&self, ctx: &RequestContext, user_id: UserId) -> Result<bool, AuthError>;
}

/// Persistence operations for users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `email` - Email, unique across users
    /// * `password_hash` - Password hash produced by the hasher
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `UserExists` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn save(&self, email: &str, password_hash: &[u8]) -> Result<UserId, StorageError>;

    /// Retrieve user by email address (exact match).
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<User, StorageError>;

    /// Retrieve the admin flag of a user.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this id
    /// * `Database` - Storage operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Read-only access to registered applications.
#[async_trait]
pub trait AppStore: Send + Sync + 'static {
    /// Retrieve application by identifier.
    ///
    /// # Errors
    /// * `AppNotFound` - No application with this id
    /// * `Database` - Storage operation failed
    async fn find_by_id(&self, app_id: AppId) -> Result<App, StorageError>;
}

/// Diagnostics sink for authentication events.
pub trait AuthObserver: Send + Sync + 'static {
    fn record(&self, event: &AuthEvent);
}

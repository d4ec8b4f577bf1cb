use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::SessionClaims;
use auth::TokenIssuer;
use chrono::Duration;

use crate::domain::auth::context::RequestContext;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::InternalCause;
use crate::domain::auth::errors::StorageError;
use crate::domain::auth::events::AuthEvent;
use crate::domain::auth::events::AuthOutcome;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppStore;
use crate::domain::auth::ports::AuthObserver;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserStore;

const LOGIN: &str = "auth.login";
const REGISTER: &str = "auth.register";
const IS_ADMIN: &str = "auth.is_admin";

/// Domain service implementation for authentication.
///
/// Orchestrates the stores, the password hasher and the token issuer, and
/// classifies every failure into an [`AuthError`]. Holds no mutable state;
/// one instance serves all concurrent requests.
pub struct AuthService<US, AS, O>
where
    US: UserStore,
    AS: AppStore,
    O: AuthObserver,
{
    user_store: Arc<US>,
    app_store: Arc<AS>,
    observer: Arc<O>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_ttl: Duration,
}

impl<US, AS, O> AuthService<US, AS, O>
where
    US: UserStore,
    AS: AppStore,
    O: AuthObserver,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_store` - User persistence implementation
    /// * `app_store` - Application lookup implementation
    /// * `observer` - Diagnostics sink for audit events
    /// * `token_issuer` - Session token signer
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(
        user_store: Arc<US>,
        app_store: Arc<AS>,
        observer: Arc<O>,
        token_issuer: TokenIssuer,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_store,
            app_store,
            observer,
            password_hasher: PasswordHasher::new(),
            token_issuer,
            token_ttl,
        }
    }

    fn emit(&self, ctx: &RequestContext, op: &'static str, outcome: AuthOutcome) {
        self.observer.record(&AuthEvent::new(ctx, op, outcome));
    }

    /// Hash on the blocking pool. A hash that has started runs to completion
    /// even if the request is cancelled or times out; only the wait is cut.
    async fn hash_password(
        &self,
        ctx: &RequestContext,
        op: &'static str,
        password: String,
    ) -> Result<Vec<u8>, AuthError> {
        let hasher = self.password_hasher;

        ctx.guard(op, async move {
            tokio::task::spawn_blocking(move || hasher.hash(&password))
                .await
                .map_err(|e| AuthError::internal(op, InternalCause::Task(e.to_string())))?
                .map_err(|e| AuthError::internal(op, e))
        })
        .await
    }

    /// Verify `password` against `stored_hash`, or against the decoy hash
    /// when there is no stored hash. Returns false in the latter case.
    async fn verify_password(
        &self,
        ctx: &RequestContext,
        op: &'static str,
        stored_hash: Option<Vec<u8>>,
        password: String,
    ) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;

        ctx.guard(op, async move {
            tokio::task::spawn_blocking(move || match stored_hash {
                Some(hash) => hasher.verify(&hash, &password),
                None => {
                    hasher.verify_decoy(&password);
                    false
                }
            })
            .await
            .map_err(|e| AuthError::internal(op, InternalCause::Task(e.to_string())))
        })
        .await
    }

    async fn authenticate(
        &self,
        ctx: &RequestContext,
        command: LoginCommand,
    ) -> Result<(User, String), AuthError> {
        let LoginCommand {
            email,
            password,
            app_id,
        } = command;

        let user = ctx
            .guard(LOGIN, async {
                match self.user_store.find_by_email(&email).await {
                    Ok(user) => Ok(Some(user)),
                    Err(StorageError::UserNotFound) => Ok(None),
                    Err(e) => Err(AuthError::internal(LOGIN, e)),
                }
            })
            .await?;

        let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
        let verified = self
            .verify_password(ctx, LOGIN, stored_hash, password)
            .await?;

        let user = match user {
            Some(user) if verified => user,
            _ => return Err(AuthError::InvalidCredentials { op: LOGIN }),
        };

        let app = ctx
            .guard(LOGIN, async {
                self.app_store
                    .find_by_id(app_id)
                    .await
                    .map_err(|e| match e {
                        StorageError::AppNotFound => AuthError::InvalidAppId { op: LOGIN },
                        e => AuthError::internal(LOGIN, e),
                    })
            })
            .await?;

        let token = SessionClaims::new(user.id.0, user.email.clone(), app.id.0, self.token_ttl)
            .and_then(|claims| self.token_issuer.issue(&claims, &app.secret))
            .map_err(|e| AuthError::internal(LOGIN, e))?;

        Ok((user, token))
    }

    async fn create_user(
        &self,
        ctx: &RequestContext,
        command: RegisterCommand,
    ) -> Result<UserId, AuthError> {
        let RegisterCommand { email, password } = command;
        let password_hash = self.hash_password(ctx, REGISTER, password).await?;

        ctx.guard(REGISTER, async {
            self.user_store
                .save(&email, &password_hash)
                .await
                .map_err(|e| match e {
                    StorageError::UserExists => AuthError::UserExists { op: REGISTER },
                    e => AuthError::internal(REGISTER, e),
                })
        })
        .await
    }
}

#[async_trait]
impl<US, AS, O> AuthServicePort for AuthService<US, AS, O>
where
    US: UserStore,
    AS: AppStore,
    O: AuthObserver,
{
    async fn login(
        &self,
        ctx: &RequestContext,
        command: LoginCommand,
    ) -> Result<String, AuthError> {
        let email = command.email.clone();
        let app_id = command.app_id;
        self.emit(
            ctx,
            LOGIN,
            AuthOutcome::Started {
                subject: email.clone(),
            },
        );

        match self.authenticate(ctx, command).await {
            Ok((user, token)) => {
                self.emit(
                    ctx,
                    LOGIN,
                    AuthOutcome::LoginSucceeded {
                        user_id: user.id,
                        email: user.email,
                        app_id,
                    },
                );
                Ok(token)
            }
            Err(error) => {
                self.emit(
                    ctx,
                    LOGIN,
                    AuthOutcome::Failed {
                        subject: email,
                        error: error.clone(),
                    },
                );
                Err(error)
            }
        }
    }

    async fn register(
        &self,
        ctx: &RequestContext,
        command: RegisterCommand,
    ) -> Result<UserId, AuthError> {
        let email = command.email.clone();
        self.emit(
            ctx,
            REGISTER,
            AuthOutcome::Started {
                subject: email.clone(),
            },
        );

        match self.create_user(ctx, command).await {
            Ok(user_id) => {
                self.emit(ctx, REGISTER, AuthOutcome::UserRegistered { user_id, email });
                Ok(user_id)
            }
            Err(error) => {
                self.emit(
                    ctx,
                    REGISTER,
                    AuthOutcome::Failed {
                        subject: email,
                        error: error.clone(),
                    },
                );
                Err(error)
            }
        }
    }

    async fn is_admin(&self, ctx: &RequestContext, user_id: UserId) -> Result<bool, AuthError> {
        self.emit(
            ctx,
            IS_ADMIN,
            AuthOutcome::Started {
                subject: user_id.to_string(),
            },
        );

        let result = ctx
            .guard(IS_ADMIN, async {
                self.user_store
                    .is_admin(user_id)
                    .await
                    .map_err(|e| match e {
                        StorageError::UserNotFound => AuthError::UserNotFound { op: IS_ADMIN },
                        e => AuthError::internal(IS_ADMIN, e),
                    })
            })
            .await;

        match result {
            Ok(is_admin) => {
                self.emit(ctx, IS_ADMIN, AuthOutcome::AdminChecked { user_id, is_admin });
                Ok(is_admin)
            }
            Err(error) => {
                self.emit(
                    ctx,
                    IS_ADMIN,
                    AuthOutcome::Failed {
                        subject: user_id.to_string(),
                        error: error.clone(),
                    },
                );
                Err(error)
            }
        }
    }
}

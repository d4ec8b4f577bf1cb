use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::context::RequestContext;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::UserId;

/// Audit and diagnostic event emitted by the authentication flows.
///
/// Every event is tagged with the operation name and the correlation id of
/// the request that produced it. Events never carry passwords or hashes.
#[derive(Debug, Clone)]
pub struct AuthEvent {
    pub correlation_id: Uuid,
    pub operation: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub outcome: AuthOutcome,
}

/// What happened.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// A flow began; `subject` is the email or user id it is about.
    Started { subject: String },

    LoginSucceeded {
        user_id: UserId,
        email: String,
        app_id: AppId,
    },

    UserRegistered { user_id: UserId, email: String },

    AdminChecked { user_id: UserId, is_admin: bool },

    Failed { subject: String, error: AuthError },
}

impl AuthEvent {
    /// Create a new event for the request in `ctx`.
    ///
    /// # Arguments
    /// * `ctx` - Request context supplying the correlation id
    /// * `operation` - Operation name, e.g. `auth.login`
    /// * `outcome` - What happened
    pub fn new(ctx: &RequestContext, operation: &'static str, outcome: AuthOutcome) -> Self {
        Self {
            correlation_id: ctx.correlation_id(),
            operation,
            occurred_at: Utc::now(),
            outcome,
        }
    }

    /// Get the event type name.
    ///
    /// # Returns
    /// Event type string ("started", "login_succeeded", "user_registered",
    /// "admin_checked" or "failed")
    pub fn event_type(&self) -> &'static str {
        match self.outcome {
            AuthOutcome::Started { .. } => "started",
            AuthOutcome::LoginSucceeded { .. } => "login_succeeded",
            AuthOutcome::UserRegistered { .. } => "user_registered",
            AuthOutcome::AdminChecked { .. } => "admin_checked",
            AuthOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, AuthOutcome::Failed { .. })
    }
}

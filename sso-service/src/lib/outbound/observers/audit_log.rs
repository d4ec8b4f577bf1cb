use crate::domain::auth::errors::AuthErrorKind;
use crate::domain::auth::events::AuthEvent;
use crate::domain::auth::events::AuthOutcome;
use crate::domain::auth::ports::AuthObserver;

/// Observer that writes authentication events to `tracing`.
///
/// Each event is logged inside an `auth` span carrying the operation name
/// and correlation id. Expected rejections (bad credentials, duplicates,
/// unknown ids) are warnings; internal failures are errors and include the
/// underlying cause.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl AuthObserver for TracingObserver {
    fn record(&self, event: &AuthEvent) {
        let span = tracing::info_span!(
            "auth",
            op = event.operation,
            correlation_id = %event.correlation_id,
        );
        let _entered = span.enter();

        match &event.outcome {
            AuthOutcome::Started { subject } => {
                tracing::info!(subject = %subject, "Operation started");
            }
            AuthOutcome::LoginSucceeded {
                user_id,
                email,
                app_id,
            } => {
                tracing::info!(
                    user_id = user_id.0,
                    email = %email,
                    app_id = app_id.0,
                    "User logged in"
                );
            }
            AuthOutcome::UserRegistered { user_id, email } => {
                tracing::info!(user_id = user_id.0, email = %email, "User registered");
            }
            AuthOutcome::AdminChecked { user_id, is_admin } => {
                tracing::info!(user_id = user_id.0, is_admin, "Checked admin flag");
            }
            AuthOutcome::Failed { subject, error } => match error.kind() {
                AuthErrorKind::Internal => {
                    let cause = error
                        .cause()
                        .map(|cause| cause.to_string())
                        .unwrap_or_default();
                    tracing::error!(
                        subject = %subject,
                        kind = error.kind().as_str(),
                        error = %error,
                        cause = %cause,
                        "Operation failed"
                    );
                }
                kind => {
                    tracing::warn!(
                        subject = %subject,
                        kind = kind.as_str(),
                        error = %error,
                        "Operation rejected"
                    );
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::context::RequestContext;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::errors::InternalCause;
    use crate::domain::auth::models::UserId;

    #[test]
    fn test_record_every_outcome_without_subscriber() {
        let observer = TracingObserver::new();
        let ctx = RequestContext::new();

        let outcomes = vec![
            AuthOutcome::Started {
                subject: "alice@example.com".to_string(),
            },
            AuthOutcome::AdminChecked {
                user_id: UserId(1),
                is_admin: false,
            },
            AuthOutcome::Failed {
                subject: "alice@example.com".to_string(),
                error: AuthError::InvalidCredentials { op: "auth.login" },
            },
            AuthOutcome::Failed {
                subject: "1".to_string(),
                error: AuthError::internal("auth.is_admin", InternalCause::Cancelled),
            },
        ];

        for outcome in outcomes {
            observer.record(&AuthEvent::new(&ctx, "auth.test", outcome));
        }
    }
}

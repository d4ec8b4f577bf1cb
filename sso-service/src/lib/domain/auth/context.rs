use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::InternalCause;

/// Per-request context threaded through every authentication operation.
///
/// Carries the correlation id reported with every event, and the caller's
/// cancellation signal and deadline. Every collaborator call is raced
/// against both; the collaborator future is dropped as soon as either fires.
/// Work already handed to `spawn_blocking` is not interrupted by the drop.
#[derive(Debug, Clone)]
pub struct RequestContext {
    correlation_id: Uuid,
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Create a context with a fresh correlation id, no deadline and its own
    /// cancellation token.
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Bind the context to a caller-owned cancellation token.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline to `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Run a collaborator call under this context.
    ///
    /// # Errors
    /// * `Internal(Cancelled)` - The cancellation token fired first
    /// * `Internal(DeadlineExceeded)` - The deadline passed first
    /// * Whatever `call` itself returns
    pub async fn guard<T, F>(&self, op: &'static str, call: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, AuthError>>,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                Err(AuthError::internal(op, InternalCause::Cancelled))
            }
            _ = deadline => {
                Err(AuthError::internal(op, InternalCause::DeadlineExceeded))
            }
            result = call => result,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Sentinels reported by the storage collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("User not found")]
    UserNotFound,

    #[error("App not found")]
    AppNotFound,

    #[error("User already exists")]
    UserExists,

    #[error("Database error: {0}")]
    Database(String),
}

/// Underlying cause of an internal failure.
///
/// Kept for diagnostics only; it is reachable through
/// [`std::error::Error::source`] and never part of the caller-facing message.
#[derive(Debug, Clone, Error)]
pub enum InternalCause {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

/// Caller-facing error kind, for matching without caring about the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    InvalidCredentials,
    UserExists,
    UserNotFound,
    InvalidAppId,
    Internal,
}

impl AuthErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorKind::InvalidCredentials => "invalid_credentials",
            AuthErrorKind::UserExists => "user_exists",
            AuthErrorKind::UserNotFound => "user_not_found",
            AuthErrorKind::InvalidAppId => "invalid_app_id",
            AuthErrorKind::Internal => "internal",
        }
    }
}

/// Error returned by every authentication operation.
///
/// Each variant carries the name of the operation that produced it. Only
/// `Internal` carries a cause; `InvalidCredentials` says nothing
/// about which check failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{op}: invalid credentials")]
    InvalidCredentials { op: &'static str },

    #[error("{op}: user already exists")]
    UserExists { op: &'static str },

    #[error("{op}: user not found")]
    UserNotFound { op: &'static str },

    #[error("{op}: invalid app id")]
    InvalidAppId { op: &'static str },

    #[error("{op}: internal error")]
    Internal {
        op: &'static str,
        #[source]
        cause: InternalCause,
    },
}

impl AuthError {
    pub fn internal(op: &'static str, cause: impl Into<InternalCause>) -> Self {
        AuthError::Internal {
            op,
            cause: cause.into(),
        }
    }

    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::InvalidCredentials { .. } => AuthErrorKind::InvalidCredentials,
            AuthError::UserExists { .. } => AuthErrorKind::UserExists,
            AuthError::UserNotFound { .. } => AuthErrorKind::UserNotFound,
            AuthError::InvalidAppId { .. } => AuthErrorKind::InvalidAppId,
            AuthError::Internal { .. } => AuthErrorKind::Internal,
        }
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { op }
            | AuthError::UserExists { op }
            | AuthError::UserNotFound { op }
            | AuthError::InvalidAppId { op }
            | AuthError::Internal { op, .. } => op,
        }
    }

    pub fn cause(&self) -> Option<&InternalCause> {
        match self {
            AuthError::Internal { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

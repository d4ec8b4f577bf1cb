use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token expiration out of range for ttl of {0}s")]
    ExpirationOutOfRange(i64),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

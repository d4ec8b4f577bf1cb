use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Session token payload.
///
/// The field names are a wire contract shared with every service that
/// validates these tokens: `uid`, `email`, `app_id` and `exp`. Nothing else is
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// User identifier
    pub uid: i64,

    /// User email as stored
    pub email: String,

    /// Application the token is scoped to
    pub app_id: i32,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims that expire `ttl` from now.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Target application identifier
    /// * `ttl` - Token lifetime
    ///
    /// # Errors
    /// * `ExpirationOutOfRange` - Now plus `ttl` is not a representable instant
    pub fn new(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        Self::issued_at(uid, email, app_id, ttl, Utc::now())
    }

    /// Create claims that expire `ttl` after `issued_at`.
    pub fn issued_at(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::ExpirationOutOfRange(ttl.num_seconds()))?;

        Ok(Self {
            uid,
            email: email.into(),
            app_id,
            exp: expires_at.timestamp(),
        })
    }
}

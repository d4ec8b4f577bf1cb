use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Session token issuer.
///
/// Signs [`SessionClaims`] with a per-application secret, so a token issued
/// for one application never validates under another application's secret.
/// Only the HMAC family is supported because application secrets are shared
/// symmetric keys.
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new issuer for the given signing algorithm.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is not HS256, HS384 or HS512
    pub fn new(algorithm: Algorithm) -> Result<Self, TokenError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self { algorithm }),
            other => Err(TokenError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    /// Algorithm written into every token header.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sign claims into a JWT.
    ///
    /// # Arguments
    /// * `claims` - Session claims to encode
    /// * `secret` - Signing secret of the target application
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, claims: &SessionClaims, secret: &[u8]) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &EncodingKey::from_secret(secret))
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::HS256,
        }
    }
}

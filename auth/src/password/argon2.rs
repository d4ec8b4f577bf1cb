use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Plaintext behind the decoy hash. Never matches a real account because the
/// decoy hash is not stored anywhere.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Hashes are produced in PHC string format and handed out as raw bytes so
/// storage layers can keep them in binary columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with a fresh random salt, so hashing the same password
    /// twice yields two different outputs.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash as bytes (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<Vec<u8>, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string().into_bytes())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison is constant-time. A hash that is not valid UTF-8
    /// or not a PHC string is treated as a mismatch rather than an error.
    ///
    /// # Arguments
    /// * `hash` - Stored password hash in PHC string format
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, hash: &[u8], password: &str) -> bool {
        let Ok(encoded) = std::str::from_utf8(hash) else {
            return false;
        };
        let Ok(parsed_hash) = PasswordHash::new(encoded) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Burn one verification against a decoy hash.
    ///
    /// Callers use this when no stored hash exists for an account so the
    /// "unknown account" path costs as much as the "wrong password" path.
    pub fn verify_decoy(&self, password: &str) {
        let decoy = DECOY_HASH.get_or_init(|| {
            self.hash(DECOY_PASSWORD)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
        });

        if let Some(decoy) = decoy {
            let _ = self.verify(decoy.as_bytes(), password);
        }
    }
}

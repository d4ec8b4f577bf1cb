//! Authentication utilities library
//!
//! Provides the security-sensitive building blocks of the SSO service:
//! - Password hashing (Argon2id)
//! - Session token issuance (JWT signed with a per-application secret)
//!
//! The service owns the orchestration (lookups, error classification); this
//! crate only hashes, verifies and signs.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password"));
//! assert!(!hasher.verify(&hash, "not_my_password"));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionClaims, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::default();
//! let claims = SessionClaims::new(42, "alice@example.com", 1, Duration::hours(1)).unwrap();
//! let token = issuer.issue(&claims, b"app-secret").unwrap();
//! assert_eq!(token.split('.').count(), 3);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::SessionClaims;
pub use token::SigningAlgorithm;
pub use token::TokenError;
pub use token::TokenIssuer;

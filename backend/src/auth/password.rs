//! Password hashing using bcrypt
//!
//! Provides salted, cost-factor hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. In async contexts use the
//! `*_async` variants, which run on the blocking thread pool.

use munch_bunch_shared::validation::{validate_password, MAX_PASSWORD_BYTES};
use munch_bunch_shared::AuthError;
use tracing::debug;

/// Password hashing service
///
/// The cost factor is fixed at construction from configuration. The service
/// is `Copy`, so it can be moved into blocking tasks freely.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt (blocking operation)
    ///
    /// The returned string embeds algorithm, cost, salt and digest. Any
    /// failure is reported as `AuthError::Hashing`; an unusable hash is
    /// never returned.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        validate_password(password).map_err(AuthError::Hashing)?;
        bcrypt::hash(password, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(&self, password: String) -> Result<String, AuthError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Comparison is constant-time. Mismatches, malformed hashes and internal
    /// errors all come back as `false`; the reason is only logged.
    ///
    /// Candidates longer than bcrypt's input limit never match: no stored
    /// hash was made from one, and bcrypt would only compare their prefix.
    pub fn verify(password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            debug!("Password verification failed: candidate exceeds bcrypt limit");
            return false;
        }
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                debug!(error = %e, "Password verification failed");
                false
            }
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> bool {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .unwrap_or_else(|e| {
                debug!(error = %e, "Password verification task failed");
                false
            })
    }
}

//! Error types for the Munch Bunch application

use thiserror::Error;

/// Authentication and authorization failures
///
/// The `Display` text of each variant is what clients see, so none of them
/// say which individual check failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An authorization header is required")]
    MissingHeader,

    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Invalid authorization token")]
    InvalidToken,

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl AuthError {
    /// Whether the failure originates from the request rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::Hashing(_) | AuthError::Signing(_))
    }
}

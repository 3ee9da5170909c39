//! Bearer token issuance and validation
//!
//! Tokens are HMAC-signed JWTs carrying a single `username` claim. Keys are
//! derived from the configured secret once and shared behind `Arc`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use munch_bunch_shared::AuthError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Algorithm used for every issued token
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithms a presented token may advertise; only the HMAC family
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated username
    pub username: String,
    /// Expiration time (Unix timestamp), only present when expiry is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Pre-computed JWT keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiry_secs: Option<i64>,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    ///
    /// With `expiry_secs` unset, issued tokens never expire and verification
    /// does not ask for an `exp` claim.
    pub fn new(secret: &SecretString, expiry_secs: Option<i64>) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.leeway = 0;
        match expiry_secs {
            Some(_) => {
                validation.validate_exp = true;
                validation.required_spec_claims = HashSet::from(["exp".to_string()]);
            }
            None => {
                validation.validate_exp = false;
                validation.required_spec_claims = HashSet::new();
            }
        }

        Self {
            keys: JwtKeys::new(secret),
            expiry_secs,
            validation: Arc::new(validation),
        }
    }

    /// Issue a signed token for an already-authenticated user
    ///
    /// Stateless: nothing about the token is retained.
    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let exp = match self.expiry_secs {
            Some(secs) => Some(expiry_timestamp(secs)?),
            None => None,
        };
        let claims = Claims {
            username: username.to_string(),
            exp,
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token's algorithm, signature and claims
    ///
    /// Every failure collapses into `AuthError::InvalidToken`; the concrete
    /// cause is only logged.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        if data.claims.username.is_empty() {
            debug!("Token rejected: empty username claim");
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

/// `now + secs` as a Unix timestamp, failing instead of overflowing
fn expiry_timestamp(secs: i64) -> Result<i64, AuthError> {
    Duration::try_seconds(secs)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .map(|at| at.timestamp())
        .ok_or_else(|| AuthError::Signing(format!("token lifetime of {}s is out of range", secs)))
}

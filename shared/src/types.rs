//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Outcome marker carried by every response envelope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response envelope shared by every endpoint
///
/// `code` mirrors the HTTP status so clients that only look at the body
/// still see it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub status: ResponseStatus,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope with `data: null`
    pub fn empty(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            status: ResponseStatus::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Credentials submitted to the authenticate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

/// Signed bearer token handed back after authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Registration / user creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(rename = "fname")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(rename = "lname")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub has_truck: bool,
}

/// Full replacement of a user's profile
///
/// `password` is optional: when absent the stored hash is kept.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "fname")]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(rename = "lname")]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub has_truck: bool,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    #[serde(rename = "fname")]
    pub first_name: String,
    #[serde(rename = "lname")]
    pub last_name: String,
    pub email: String,
    pub has_truck: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Trucks
// ============================================================================

/// Create or replace a truck
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TruckRequest {
    #[validate(length(min = 1, max = 255, message = "Truck name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckResponse {
    pub id: i32,
    pub name: String,
    pub cell: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters of the truck listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TruckListQuery {
    pub start: Option<i64>,
    pub count: Option<i64>,
}

impl TruckListQuery {
    pub const DEFAULT_COUNT: i64 = 10;
    pub const MAX_COUNT: i64 = 10;

    /// Clamp paging to the supported window
    ///
    /// Returns `(start, count)`: a count outside `1..=MAX_COUNT` falls back to
    /// the default and a negative start becomes zero.
    pub fn normalize(&self) -> (i64, i64) {
        let count = match self.count {
            Some(c) if (1..=Self::MAX_COUNT).contains(&c) => c,
            _ => Self::DEFAULT_COUNT,
        };
        let start = self.start.unwrap_or(0).max(0);
        (start, count)
    }
}

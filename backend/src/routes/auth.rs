//! Authentication routes
//!
//! Registration and token issuance. Password hashing and verification run
//! on the blocking thread pool.

use super::{reply, Reply};
use crate::error::{ApiJson, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Router};
use munch_bunch_shared::types::{
    AuthenticateRequest, CreateUserRequest, TokenResponse, UserProfile,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/authenticate", post(authenticate))
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> ApiResult<Reply<UserProfile>> {
    let profile = UserService::create(state.users(), state.passwords(), req).await?;
    Ok(reply(StatusCode::CREATED, "User registered", profile))
}

/// Exchange a username/password pair for a bearer token
///
/// POST /api/v1/auth/authenticate
async fn authenticate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AuthenticateRequest>,
) -> ApiResult<Reply<TokenResponse>> {
    let token =
        UserService::authenticate(state.users(), state.jwt(), &req.username, &req.password)
            .await?;
    Ok(reply(
        StatusCode::OK,
        "Authenticated",
        TokenResponse { token },
    ))
}

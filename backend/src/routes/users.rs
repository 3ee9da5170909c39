//! User routes
//!
//! Profile CRUD. These routes are not behind the bearer gate.

use super::{reply, reply_empty, Reply};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use munch_bunch_shared::types::{CreateUserRequest, UpdateUserRequest, UserProfile};
use munch_bunch_shared::validation::parse_id;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route(
            "/user/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn user_id(raw: &str) -> Result<i32, ApiError> {
    parse_id(raw, "user").map_err(ApiError::BadRequest)
}

/// POST /api/v1/user
async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> ApiResult<Reply<UserProfile>> {
    let profile = UserService::create(state.users(), state.passwords(), req).await?;
    Ok(reply(StatusCode::CREATED, "User created", profile))
}

/// GET /api/v1/user/:id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Reply<UserProfile>> {
    let profile = UserService::get(state.users(), user_id(&id)?).await?;
    Ok(reply(StatusCode::OK, "User found", profile))
}

/// PUT /api/v1/user/:id
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<Reply<UserProfile>> {
    let id = user_id(&id)?;
    let profile = UserService::update(state.users(), state.passwords(), id, req).await?;
    Ok(reply(StatusCode::OK, "User updated", profile))
}

/// DELETE /api/v1/user/:id
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Reply<()>> {
    UserService::delete(state.users(), user_id(&id)?).await?;
    Ok(reply_empty(StatusCode::OK, "User deleted"))
}

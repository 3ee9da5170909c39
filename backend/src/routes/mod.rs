//! Route definitions for the Munch Bunch API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use munch_bunch_shared::ApiResponse;
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod trucks;
mod users;


pub use auth::auth_routes;
pub use trucks::truck_routes;
pub use users::user_routes;

/// Enveloped JSON reply with an explicit status
pub(crate) type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

pub(crate) fn reply<T: Serialize>(status: StatusCode, message: &str, data: T) -> Reply<T> {
    (
        status,
        Json(ApiResponse::success(status.as_u16(), message, data)),
    )
}

pub(crate) fn reply_empty(status: StatusCode, message: &str) -> Reply<()> {
    (status, Json(ApiResponse::empty(status.as_u16(), message)))
}

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes(state.clone()))
        .fallback(not_found)
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(map_response(envelope_bare_errors))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(404, "Resource not found")),
    )
        .into_response()
}

/// Give body-less error responses produced by axum or tower-http (405, 408)
/// the same error envelope as handler errors
async fn envelope_bare_errors(response: Response) -> Response {
    let status = response.status();
    let is_error = status.is_client_error() || status.is_server_error();
    if !is_error || response.headers().contains_key(header::CONTENT_TYPE) {
        return response;
    }

    let message = status.canonical_reason().unwrap_or("Request failed");
    (status, Json(ApiResponse::error(status.as_u16(), message))).into_response()
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(api_status))
        .nest("/auth", auth::auth_routes())
        .merge(users::user_routes())
        .merge(trucks::truck_routes(state))
}

#[derive(Serialize)]
struct ApiStatus {
    service: &'static str,
    version: &'static str,
}

/// GET /api/v1 - Service banner
async fn api_status() -> Reply<ApiStatus> {
    reply(
        StatusCode::OK,
        "Munch Bunch API v1",
        ApiStatus {
            service: "munch-bunch",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

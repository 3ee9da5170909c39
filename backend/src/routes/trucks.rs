//! Truck routes
//!
//! Every route here sits behind [`require_bearer`]; handlers only run for
//! requests carrying a verified token.

use super::{reply, reply_empty, Reply};
use crate::auth::{require_bearer, AuthUser};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::services::TruckService;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Router,
};
use munch_bunch_shared::types::{TruckListQuery, TruckRequest, TruckResponse};
use munch_bunch_shared::validation::parse_id;
use tracing::debug;

/// Create truck routes, gated by the bearer middleware
pub fn truck_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/trucks", get(list_trucks))
        .route("/truck", post(create_truck))
        .route(
            "/truck/:id",
            get(get_truck).put(update_truck).delete(delete_truck),
        )
        .route_layer(from_fn_with_state(state, require_bearer))
}

fn truck_id(raw: &str) -> Result<i32, ApiError> {
    parse_id(raw, "truck").map_err(ApiError::BadRequest)
}

/// GET /api/v1/trucks?start=&count=
async fn list_trucks(
    State(state): State<AppState>,
    query: Result<Query<TruckListQuery>, QueryRejection>,
) -> ApiResult<Reply<Vec<TruckResponse>>> {
    let Query(query) = query.map_err(|e| {
        debug!(reason = %e.body_text(), "Rejected truck paging");
        ApiError::BadRequest("Invalid paging parameters".to_string())
    })?;
    let trucks = TruckService::list(state.trucks(), &query).await?;
    Ok(reply(StatusCode::OK, "Trucks found", trucks))
}

/// GET /api/v1/truck/:id
async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Reply<TruckResponse>> {
    let truck = TruckService::get(state.trucks(), truck_id(&id)?).await?;
    Ok(reply(StatusCode::OK, "Truck found", truck))
}

/// POST /api/v1/truck
async fn create_truck(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ApiJson(req): ApiJson<TruckRequest>,
) -> ApiResult<Reply<TruckResponse>> {
    let truck = TruckService::create(state.trucks(), req).await?;
    debug!(username = %auth.username, truck_id = truck.id, "Truck created by user");
    Ok(reply(StatusCode::CREATED, "Truck created", truck))
}

/// PUT /api/v1/truck/:id
async fn update_truck(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TruckRequest>,
) -> ApiResult<Reply<TruckResponse>> {
    let id = truck_id(&id)?;
    let truck = TruckService::update(state.trucks(), id, req).await?;
    debug!(username = %auth.username, truck_id = id, "Truck updated by user");
    Ok(reply(StatusCode::OK, "Truck updated", truck))
}

/// DELETE /api/v1/truck/:id
async fn delete_truck(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Reply<()>> {
    let id = truck_id(&id)?;
    TruckService::delete(state.trucks(), id).await?;
    debug!(username = %auth.username, truck_id = id, "Truck deleted by user");
    Ok(reply_empty(StatusCode::OK, "Truck deleted"))
}

//! Truck service

use crate::error::ApiError;
use crate::repositories::{TruckInput, TruckRecord, TruckStore};
use munch_bunch_shared::types::{TruckListQuery, TruckRequest, TruckResponse};
use munch_bunch_shared::validation::describe;
use tracing::info;
use validator::Validate;

pub struct TruckService;

impl TruckService {
    pub async fn list(
        store: &dyn TruckStore,
        query: &TruckListQuery,
    ) -> Result<Vec<TruckResponse>, ApiError> {
        let (start, count) = query.normalize();
        let trucks = store.list(start, count).await?;
        Ok(trucks.into_iter().map(to_response).collect())
    }

    pub async fn get(store: &dyn TruckStore, id: i32) -> Result<TruckResponse, ApiError> {
        store
            .find_by_id(id)
            .await?
            .map(to_response)
            .ok_or_else(not_found)
    }

    pub async fn create(
        store: &dyn TruckStore,
        req: TruckRequest,
    ) -> Result<TruckResponse, ApiError> {
        let input = to_input(req)?;
        let truck = store.create(input).await?;
        info!(truck_id = truck.id, "Truck created");
        Ok(to_response(truck))
    }

    pub async fn update(
        store: &dyn TruckStore,
        id: i32,
        req: TruckRequest,
    ) -> Result<TruckResponse, ApiError> {
        let input = to_input(req)?;
        let truck = store.update(id, input).await?.ok_or_else(not_found)?;
        info!(truck_id = truck.id, "Truck updated");
        Ok(to_response(truck))
    }

    pub async fn delete(store: &dyn TruckStore, id: i32) -> Result<(), ApiError> {
        if !store.delete(id).await? {
            return Err(not_found());
        }
        info!(truck_id = id, "Truck deleted");
        Ok(())
    }
}

fn not_found() -> ApiError {
    ApiError::NotFound("Truck not found".to_string())
}

fn to_input(req: TruckRequest) -> Result<TruckInput, ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(describe(&e)))?;
    Ok(TruckInput {
        name: req.name,
        cell: req.cell,
        address: req.address,
        city: req.city,
        state: req.state,
        zip: req.zip,
    })
}

fn to_response(truck: TruckRecord) -> TruckResponse {
    TruckResponse {
        id: truck.id,
        name: truck.name,
        cell: truck.cell,
        address: truck.address,
        city: truck.city,
        state: truck.state,
        zip: truck.zip,
        created_at: truck.created_at,
        updated_at: truck.updated_at,
    }
}

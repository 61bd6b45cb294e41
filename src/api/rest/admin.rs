use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::rest::auth;
use crate::error::AppError;
use crate::models::driver::DriverId;
use crate::models::location::{Location, LocationCode};
use crate::models::profile::Gender;
use crate::service::{CustomerSummary, DriverSummary};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/drivers", post(add_driver).get(list_drivers))
        .route("/admin/customers", get(list_customers))
        .route("/admin/locations", post(add_location))
        .route("/admin/revenue", get(total_revenue))
}

#[derive(Deserialize)]
pub struct AddDriverRequest {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub password: String,
    pub location: LocationCode,
}

#[derive(Serialize)]
pub struct AddDriverResponse {
    pub id: DriverId,
    pub location: LocationCode,
}

#[derive(Deserialize)]
pub struct AddLocationRequest {
    pub code: LocationCode,
    pub distance: u32,
}

#[derive(Serialize)]
pub struct RevenueResponse {
    pub total: u64,
}

async fn add_driver(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<AddDriverRequest>,
) -> Result<Json<AddDriverResponse>, AppError> {
    let admin = auth::admin(&state, &headers)?;
    let id = state.service.admin_add_driver(
        &admin,
        &payload.name,
        payload.age,
        payload.gender,
        &payload.password,
        &payload.location,
    )?;

    info!(driver_id = %id, location = %payload.location, "driver added");
    Ok(Json(AddDriverResponse {
        id,
        location: payload.location,
    }))
}

async fn list_drivers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<DriverSummary>>, AppError> {
    let admin = auth::admin(&state, &headers)?;
    Ok(Json(state.service.admin_list_drivers(&admin)?))
}

async fn list_customers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    let admin = auth::admin(&state, &headers)?;
    Ok(Json(state.service.admin_list_customers(&admin)))
}

async fn add_location(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<AddLocationRequest>,
) -> Result<Json<Location>, AppError> {
    let admin = auth::admin(&state, &headers)?;
    state
        .service
        .admin_add_location(&admin, payload.code.clone(), payload.distance)?;

    info!(code = %payload.code, distance = payload.distance, "location added");
    Ok(Json(Location {
        code: payload.code,
        distance: payload.distance,
    }))
}

async fn total_revenue(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<RevenueResponse>, AppError> {
    let admin = auth::admin(&state, &headers)?;
    Ok(Json(RevenueResponse {
        total: state.service.admin_total_revenue(&admin),
    }))
}

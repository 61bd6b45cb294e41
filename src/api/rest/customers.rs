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
use crate::models::booking::CustomerBooking;
use crate::models::customer::{Customer, CustomerId};
use crate::models::profile::Gender;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", post(sign_up))
        .route("/customers/me", get(me))
        .route("/customers/me/bookings", get(bookings))
}

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub password: String,
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub id: CustomerId,
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>, AppError> {
    let id = state.service.sign_up_customer(
        &payload.name,
        payload.age,
        payload.gender,
        &payload.password,
    )?;

    info!(customer_id = %id, "customer signed up");
    Ok(Json(SignUpResponse { id }))
}

async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Customer>, AppError> {
    let customer = auth::customer(&state, &headers)?;
    Ok(Json(state.service.customer(&customer)?))
}

async fn bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<CustomerBooking>>, AppError> {
    let customer = auth::customer(&state, &headers)?;
    Ok(Json(state.service.customer_history(&customer)))
}

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
use crate::models::booking::DriverBooking;
use crate::models::driver::Driver;
use crate::models::location::LocationCode;
use crate::models::trip::{ActiveTrip, TripEvent};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers/me", get(me))
        .route("/drivers/me/complete", post(complete_ride))
        .route("/drivers/me/earnings", get(earnings))
}

#[derive(Serialize)]
pub struct DriverView {
    #[serde(flatten)]
    pub driver: Driver,
    pub active_trip: Option<ActiveTrip>,
}

#[derive(Deserialize)]
pub struct CompleteRideRequest {
    pub destination: LocationCode,
}

async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DriverView>, AppError> {
    let driver = auth::driver(&state, &headers)?;
    Ok(Json(DriverView {
        driver: state.service.driver(&driver)?,
        active_trip: state.service.active_trip(&driver),
    }))
}

async fn complete_ride(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<CompleteRideRequest>,
) -> Result<Json<DriverBooking>, AppError> {
    let driver = auth::driver(&state, &headers)?;
    let booking = state.service.complete_ride(&driver, &payload.destination)?;

    state.metrics.rides_completed_total.inc();
    state.metrics.revenue_total.add(booking.commission as i64);
    state
        .metrics
        .drivers_on_trip
        .set(state.service.drivers_on_trip() as i64);

    info!(
        trip_id = %booking.trip_id,
        driver_id = %driver.id(),
        fare = booking.fare,
        commission = booking.commission,
        profit = booking.profit,
        "ride completed"
    );

    let _ = state.trip_events_tx.send(TripEvent::Completed {
        driver_id: driver.id(),
        booking: booking.clone(),
    });

    Ok(Json(booking))
}

async fn earnings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<DriverBooking>>, AppError> {
    let driver = auth::driver(&state, &headers)?;
    Ok(Json(state.service.driver_earnings(&driver)))
}

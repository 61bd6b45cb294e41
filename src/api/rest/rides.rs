use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::rest::auth;
use crate::error::AppError;
use crate::models::location::LocationCode;
use crate::models::trip::{RideAssignment, TripEvent};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/rides", post(request_ride))
}

#[derive(Deserialize)]
pub struct RideRequest {
    pub source: LocationCode,
    pub destination: LocationCode,
}

async fn request_ride(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RideRequest>,
) -> Result<Json<RideAssignment>, AppError> {
    let customer = auth::customer(&state, &headers)?;

    let start = Instant::now();
    let result = state
        .service
        .request_ride(&customer, &payload.source, &payload.destination);
    let elapsed = start.elapsed().as_secs_f64();

    let assignment = match result {
        Ok(assignment) => {
            state.metrics.record_request("assigned", elapsed);
            assignment
        }
        Err(AppError::NoDriverAvailable) => {
            state.metrics.record_request("no_driver", elapsed);
            warn!(
                customer_id = %customer.id(),
                source = %payload.source,
                "no driver available"
            );
            return Err(AppError::NoDriverAvailable);
        }
        Err(err) => {
            state.metrics.record_request("rejected", elapsed);
            warn!(customer_id = %customer.id(), error = %err, "ride request rejected");
            return Err(err);
        }
    };

    state
        .metrics
        .drivers_on_trip
        .set(state.service.drivers_on_trip() as i64);

    info!(
        trip_id = %assignment.trip_id,
        customer_id = %customer.id(),
        driver_id = %assignment.driver.id,
        source = %assignment.source,
        destination = %assignment.destination,
        fare = assignment.fare,
        "ride assigned"
    );

    let _ = state.trip_events_tx.send(TripEvent::Requested {
        customer_id: customer.id(),
        assignment: assignment.clone(),
    });

    Ok(Json(assignment))
}

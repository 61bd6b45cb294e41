use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::booking::DriverBooking;
use crate::models::customer::CustomerId;
use crate::models::driver::DriverId;
use crate::models::location::LocationCode;
use crate::models::profile::Profile;

/// A reserved trip whose driver is still `OnTrip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveTrip {
    pub id: Uuid,
    pub customer_id: CustomerId,
    pub driver_id: DriverId,
    pub source: LocationCode,
    pub destination: LocationCode,
    pub fare: u64,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedDriver {
    pub id: DriverId,
    #[serde(flatten)]
    pub profile: Profile,
    /// Where the cab starts from on its way to the pickup.
    pub location: LocationCode,
    pub distance_to_pickup: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideAssignment {
    pub trip_id: Uuid,
    pub source: LocationCode,
    pub destination: LocationCode,
    pub fare: u64,
    pub driver: AssignedDriver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TripEvent {
    Requested {
        customer_id: CustomerId,
        assignment: RideAssignment,
    },
    Completed {
        driver_id: DriverId,
        booking: DriverBooking,
    },
}

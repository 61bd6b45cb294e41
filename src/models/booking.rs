use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::location::LocationCode;
use crate::models::profile::Gender;

/// Customer-facing record of a completed trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerBooking {
    pub trip_id: Uuid,
    pub source: LocationCode,
    pub destination: LocationCode,
    pub driver_name: String,
    pub driver_gender: Gender,
    pub fare: u64,
    pub completed_at: DateTime<Utc>,
}

/// Driver-facing earnings record of a completed trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverBooking {
    pub trip_id: Uuid,
    pub source: LocationCode,
    pub destination: LocationCode,
    pub fare: u64,
    pub commission: u64,
    pub profit: u64,
    pub completed_at: DateTime<Utc>,
}

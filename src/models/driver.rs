use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::LocationCode;
use crate::models::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u32);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DriverStatus {
    Available,
    OnTrip,
}

#[derive(Debug, Clone, Serialize)]
pub struct Driver {
    pub id: DriverId,
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(skip)]
    pub password: String,
    pub location: LocationCode,
    pub status: DriverStatus,
    pub trips: u32,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Available
    }
}

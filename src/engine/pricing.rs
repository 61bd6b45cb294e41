use serde::{Deserialize, Serialize};

/// Currency units charged per unit of distance travelled.
pub const FARE_PER_DISTANCE_UNIT: u64 = 10;

/// Platform share of every fare, in percent.
pub const COMMISSION_PERCENT: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareSplit {
    pub fare: u64,
    pub commission: u64,
    pub profit: u64,
}

pub fn fare_for_distance(distance: u32) -> u64 {
    u64::from(distance) * FARE_PER_DISTANCE_UNIT
}

/// Splits a fare into platform commission and driver profit.
///
/// Commission is rounded half-up to a whole unit; profit takes the remainder
/// so the two always sum to the fare.
pub fn split_fare(fare: u64) -> FareSplit {
    let commission = (fare * COMMISSION_PERCENT + 50) / 100;

    FareSplit {
        fare,
        commission,
        profit: fare - commission,
    }
}

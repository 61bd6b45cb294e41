pub mod bookings;
pub mod revenue;

pub use bookings::BookingLedger;
pub use revenue::RevenueAggregator;

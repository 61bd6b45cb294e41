use dashmap::DashMap;

use crate::models::booking::{CustomerBooking, DriverBooking};
use crate::models::customer::CustomerId;
use crate::models::driver::DriverId;

/// Append-only trip history, one sequence per customer and per driver.
#[derive(Default)]
pub struct BookingLedger {
    customers: DashMap<CustomerId, Vec<CustomerBooking>>,
    drivers: DashMap<DriverId, Vec<DriverBooking>>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_customer_trip(&self, customer: CustomerId, booking: CustomerBooking) {
        self.customers.entry(customer).or_default().push(booking);
    }

    pub fn record_driver_trip(&self, driver: DriverId, booking: DriverBooking) {
        self.drivers.entry(driver).or_default().push(booking);
    }

    pub fn customer_history(&self, customer: CustomerId) -> Vec<CustomerBooking> {
        self.customers
            .get(&customer)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn driver_history(&self, driver: DriverId) -> Vec<DriverBooking> {
        self.drivers
            .get(&driver)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Sum of profit over every trip the driver has completed.
    pub fn driver_earnings_total(&self, driver: DriverId) -> u64 {
        self.drivers
            .get(&driver)
            .map(|entry| entry.value().iter().map(|booking| booking.profit).sum())
            .unwrap_or(0)
    }

    pub fn commission_total(&self) -> u64 {
        self.drivers
            .iter()
            .map(|entry| entry.value().iter().map(|booking| booking.commission).sum::<u64>())
            .sum()
    }
}

pub mod handles;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::engine::dispatch::DispatchEngine;
use crate::engine::pricing::split_fare;
use crate::error::AppError;
use crate::geo::LocationTable;
use crate::ledger::{BookingLedger, RevenueAggregator};
use crate::models::booking::{CustomerBooking, DriverBooking};
use crate::models::customer::{Customer, CustomerId};
use crate::models::driver::{Driver, DriverId, DriverStatus};
use crate::models::location::{Location, LocationCode};
use crate::models::profile::{validate_password, Gender, Profile};
use crate::models::trip::{ActiveTrip, AssignedDriver, RideAssignment};

pub use handles::{AdminHandle, CustomerHandle, DriverHandle};

#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummary {
    #[serde(flatten)]
    pub customer: Customer,
    pub bookings: Vec<CustomerBooking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverSummary {
    #[serde(flatten)]
    pub driver: Driver,
    pub earnings: u64,
    pub bookings: Vec<DriverBooking>,
}

/// The dispatch service: owns every repository and exposes the operations
/// the outer layers call. Never logs; callers decide how to report.
pub struct TaxiService {
    locations: RwLock<LocationTable>,
    dispatch: DispatchEngine,
    customers: DashMap<CustomerId, Customer>,
    trips: DashMap<DriverId, ActiveTrip>,
    ledger: BookingLedger,
    revenue: RevenueAggregator,
    next_customer_id: AtomicU32,
    next_driver_id: AtomicU32,
    admin_password: String,
}

impl TaxiService {
    pub fn new(config: &Config) -> Self {
        Self {
            locations: RwLock::new(LocationTable::new()),
            dispatch: DispatchEngine::new(),
            customers: DashMap::new(),
            trips: DashMap::new(),
            ledger: BookingLedger::new(),
            revenue: RevenueAggregator::new(),
            next_customer_id: AtomicU32::new(config.customer_id_seed),
            next_driver_id: AtomicU32::new(config.driver_id_seed),
            admin_password: config.admin_password.clone(),
        }
    }

    pub fn sign_up_customer(
        &self,
        name: &str,
        age: u8,
        gender: Gender,
        password: &str,
    ) -> Result<CustomerId, AppError> {
        let profile = Profile::new(name, age, gender)?;
        validate_password(password)?;

        let id = CustomerId(self.next_customer_id.fetch_add(1, Ordering::SeqCst));
        self.customers.insert(
            id,
            Customer {
                id,
                profile,
                password: password.to_string(),
                created_at: Utc::now(),
            },
        );

        Ok(id)
    }

    pub fn authenticate_customer(
        &self,
        id: CustomerId,
        password: &str,
    ) -> Result<CustomerHandle, AppError> {
        match self.customers.get(&id) {
            Some(customer) if customer.password == password => Ok(CustomerHandle::new(id)),
            _ => Err(AppError::AuthenticationFailed),
        }
    }

    pub fn authenticate_driver(&self, id: DriverId, password: &str) -> Result<DriverHandle, AppError> {
        match self.dispatch.get(id) {
            Ok(driver) if driver.password == password => Ok(DriverHandle::new(id)),
            _ => Err(AppError::AuthenticationFailed),
        }
    }

    pub fn authenticate_admin(&self, password: &str) -> Result<AdminHandle, AppError> {
        if password == self.admin_password {
            Ok(AdminHandle::new())
        } else {
            Err(AppError::AuthenticationFailed)
        }
    }

    pub fn customer(&self, handle: &CustomerHandle) -> Result<Customer, AppError> {
        self.customers
            .get(&handle.id())
            .map(|entry| entry.value().clone())
            .ok_or(AppError::CustomerNotFound(handle.id()))
    }

    pub fn driver(&self, handle: &DriverHandle) -> Result<Driver, AppError> {
        self.dispatch.get(handle.id())
    }

    pub fn active_trip(&self, handle: &DriverHandle) -> Option<ActiveTrip> {
        self.trips
            .get(&handle.id())
            .map(|entry| entry.value().clone())
    }

    /// Quotes the fare and reserves the best available driver.
    ///
    /// On any error nothing is reserved.
    pub fn request_ride(
        &self,
        customer: &CustomerHandle,
        source: &LocationCode,
        destination: &LocationCode,
    ) -> Result<RideAssignment, AppError> {
        if !self.customers.contains_key(&customer.id()) {
            return Err(AppError::CustomerNotFound(customer.id()));
        }

        let trip_id = Uuid::new_v4();
        let (fare, reservation) = {
            let locations = self.read_locations()?;
            let fare = locations.fare(source, destination)?;
            let reservation = self.dispatch.reserve(&locations, source, |reservation| {
                self.trips.insert(
                    reservation.driver.id,
                    ActiveTrip {
                        id: trip_id,
                        customer_id: customer.id(),
                        driver_id: reservation.driver.id,
                        source: source.clone(),
                        destination: destination.clone(),
                        fare,
                        requested_at: Utc::now(),
                    },
                );
            })?;
            (fare, reservation)
        };
        let driver = reservation.driver;

        Ok(RideAssignment {
            trip_id,
            source: source.clone(),
            destination: destination.clone(),
            fare,
            driver: AssignedDriver {
                id: driver.id,
                profile: driver.profile,
                location: driver.location,
                distance_to_pickup: reservation.distance_to_pickup,
            },
        })
    }

    /// Finishes the driver's trip in flight: releases the driver, writes
    /// both ledger entries and credits the commission, all under the
    /// dispatch guard so readers never see a half-settled trip.
    pub fn complete_ride(
        &self,
        handle: &DriverHandle,
        destination: &LocationCode,
    ) -> Result<DriverBooking, AppError> {
        let driver_id = handle.id();
        if !self.read_locations()?.contains(destination) {
            return Err(AppError::UnknownLocation(destination.to_string()));
        }

        let pending = self
            .active_trip(handle)
            .ok_or_else(|| no_trip_in_flight(driver_id))?;
        if pending.destination != *destination {
            return Err(AppError::BadRequest(format!(
                "trip {} ends at {}, not {}",
                pending.id, pending.destination, destination
            )));
        }

        let (_, trip) = self
            .trips
            .remove_if(&driver_id, |_, trip| trip.id == pending.id)
            .ok_or_else(|| no_trip_in_flight(driver_id))?;

        let settled = self.dispatch.complete(driver_id, destination.clone(), |driver| {
            let split = split_fare(trip.fare);
            let completed_at = Utc::now();
            let driver_booking = DriverBooking {
                trip_id: trip.id,
                source: trip.source.clone(),
                destination: trip.destination.clone(),
                fare: split.fare,
                commission: split.commission,
                profit: split.profit,
                completed_at,
            };

            self.ledger.record_customer_trip(
                trip.customer_id,
                CustomerBooking {
                    trip_id: trip.id,
                    source: trip.source.clone(),
                    destination: trip.destination.clone(),
                    driver_name: driver.profile.name.clone(),
                    driver_gender: driver.profile.gender,
                    fare: split.fare,
                    completed_at,
                },
            );
            self.ledger.record_driver_trip(driver_id, driver_booking.clone());
            self.revenue.credit(split.commission);

            driver_booking
        });

        if settled.is_err() {
            self.trips.insert(driver_id, trip);
        }
        settled
    }

    pub fn customer_history(&self, customer: &CustomerHandle) -> Vec<CustomerBooking> {
        self.ledger.customer_history(customer.id())
    }

    pub fn driver_earnings(&self, driver: &DriverHandle) -> Vec<DriverBooking> {
        self.ledger.driver_history(driver.id())
    }

    pub fn admin_add_driver(
        &self,
        _admin: &AdminHandle,
        name: &str,
        age: u8,
        gender: Gender,
        password: &str,
        initial_location: &LocationCode,
    ) -> Result<DriverId, AppError> {
        let profile = Profile::new(name, age, gender)?;
        validate_password(password)?;
        if !self.read_locations()?.contains(initial_location) {
            return Err(AppError::UnknownLocation(initial_location.to_string()));
        }

        let id = DriverId(self.next_driver_id.fetch_add(1, Ordering::SeqCst));
        self.dispatch.register(Driver {
            id,
            profile,
            password: password.to_string(),
            location: initial_location.clone(),
            status: DriverStatus::Available,
            trips: 0,
            updated_at: Utc::now(),
        })?;

        Ok(id)
    }

    pub fn admin_add_location(
        &self,
        _admin: &AdminHandle,
        code: LocationCode,
        distance: u32,
    ) -> Result<(), AppError> {
        self.write_locations()?.insert(code, distance)
    }

    pub fn admin_list_customers(&self, _admin: &AdminHandle) -> Vec<CustomerSummary> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        customers.sort_by_key(|customer| customer.id);

        customers
            .into_iter()
            .map(|customer| CustomerSummary {
                bookings: self.ledger.customer_history(customer.id),
                customer,
            })
            .collect()
    }

    /// Drivers in id order with their bookings, read under the dispatch
    /// guard so trip counts always agree with the ledger.
    pub fn admin_list_drivers(&self, _admin: &AdminHandle) -> Result<Vec<DriverSummary>, AppError> {
        self.dispatch.with_drivers(|drivers| {
            drivers
                .into_iter()
                .map(|driver| DriverSummary {
                    earnings: self.ledger.driver_earnings_total(driver.id),
                    bookings: self.ledger.driver_history(driver.id),
                    driver,
                })
                .collect()
        })
    }

    pub fn admin_total_revenue(&self, _admin: &AdminHandle) -> u64 {
        self.revenue.total()
    }

    pub fn list_locations(&self) -> Result<Vec<Location>, AppError> {
        Ok(self.read_locations()?.all().to_vec())
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn driver_count(&self) -> usize {
        self.dispatch.len()
    }

    pub fn drivers_on_trip(&self) -> usize {
        self.dispatch.on_trip_count()
    }

    pub fn location_count(&self) -> Result<usize, AppError> {
        Ok(self.read_locations()?.len())
    }

    pub fn active_trip_count(&self) -> usize {
        self.trips.len()
    }

    fn read_locations(&self) -> Result<RwLockReadGuard<'_, LocationTable>, AppError> {
        self.locations
            .read()
            .map_err(|_| AppError::Internal("location table lock poisoned".to_string()))
    }

    fn write_locations(&self) -> Result<RwLockWriteGuard<'_, LocationTable>, AppError> {
        self.locations
            .write()
            .map_err(|_| AppError::Internal("location table lock poisoned".to_string()))
    }
}

fn no_trip_in_flight(driver_id: DriverId) -> AppError {
    AppError::InvalidStateTransition(format!("driver {driver_id} has no trip in flight"))
}

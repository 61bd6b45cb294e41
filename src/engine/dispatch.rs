use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use dashmap::DashMap;

use crate::engine::matching::{select_driver, Candidate};
use crate::error::AppError;
use crate::geo::LocationTable;
use crate::models::driver::{Driver, DriverId, DriverStatus};
use crate::models::location::LocationCode;

/// Outcome of a successful reservation: the driver as it was when picked.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub driver: Driver,
    pub distance_to_pickup: u32,
}

/// Driver pool plus the availability state machine.
///
/// Reservation (scan + mark `OnTrip`) and completion both run under
/// `guard`, so a driver can never be handed to two trips at once.
pub struct DispatchEngine {
    drivers: DashMap<DriverId, Driver>,
    guard: Mutex<()>,
}

impl Default for DispatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchEngine {
    pub fn new() -> Self {
        Self {
            drivers: DashMap::new(),
            guard: Mutex::new(()),
        }
    }

    pub fn register(&self, driver: Driver) -> Result<(), AppError> {
        let _guard = self.lock()?;
        if self.drivers.contains_key(&driver.id) {
            return Err(AppError::Internal(format!(
                "driver id {} already registered",
                driver.id
            )));
        }
        self.drivers.insert(driver.id, driver);
        Ok(())
    }

    pub fn get(&self, id: DriverId) -> Result<Driver, AppError> {
        self.drivers
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(AppError::DriverNotFound(id))
    }

    /// All drivers in pool order (ascending id).
    pub fn drivers(&self) -> Vec<Driver> {
        let mut drivers: Vec<Driver> = self
            .drivers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        drivers.sort_by_key(|driver| driver.id);
        drivers
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    pub fn on_trip_count(&self) -> usize {
        self.drivers
            .iter()
            .filter(|entry| entry.value().status == DriverStatus::OnTrip)
            .count()
    }

    /// Runs `read` over a snapshot of the pool taken under the dispatch guard,
    /// so no reservation or completion is half-applied while it runs.
    pub fn with_drivers<T>(&self, read: impl FnOnce(Vec<Driver>) -> T) -> Result<T, AppError> {
        let _guard = self.lock()?;
        Ok(read(self.drivers()))
    }

    /// Selects the best available driver for `pickup` and marks it `OnTrip`.
    ///
    /// `on_reserved` runs before the guard is released.
    pub fn reserve<F>(
        &self,
        locations: &LocationTable,
        pickup: &LocationCode,
        on_reserved: F,
    ) -> Result<Reservation, AppError>
    where
        F: FnOnce(&Reservation),
    {
        let pickup_distance = locations.distance_of(pickup)?;
        let _guard = self.lock()?;

        let mut candidates = Vec::new();
        for driver in self.drivers.iter().filter(|entry| entry.value().is_available()) {
            let driver_distance = locations.distance_of(&driver.location)?;
            candidates.push(Candidate {
                driver_id: driver.id,
                distance: driver_distance.abs_diff(pickup_distance),
                trips: driver.trips,
            });
        }
        candidates.sort_by_key(|candidate| candidate.driver_id);

        let chosen = select_driver(candidates).ok_or(AppError::NoDriverAvailable)?;

        let snapshot = {
            let mut driver = self
                .drivers
                .get_mut(&chosen.driver_id)
                .ok_or(AppError::DriverNotFound(chosen.driver_id))?;
            let snapshot = driver.clone();
            driver.status = DriverStatus::OnTrip;
            driver.updated_at = Utc::now();
            snapshot
        };

        let reservation = Reservation {
            driver: snapshot,
            distance_to_pickup: chosen.distance,
        };
        on_reserved(&reservation);

        Ok(reservation)
    }

    /// Releases a driver at the end of its trip.
    ///
    /// `settle` sees the released driver and runs before the guard is
    /// released; its result is passed back to the caller.
    pub fn complete<T, F>(
        &self,
        id: DriverId,
        destination: LocationCode,
        settle: F,
    ) -> Result<T, AppError>
    where
        F: FnOnce(&Driver) -> T,
    {
        let _guard = self.lock()?;

        let released = {
            let mut driver = self
                .drivers
                .get_mut(&id)
                .ok_or(AppError::DriverNotFound(id))?;

            if driver.status != DriverStatus::OnTrip {
                return Err(AppError::InvalidStateTransition(format!(
                    "driver {id} is not on a trip"
                )));
            }

            driver.location = destination;
            driver.status = DriverStatus::Available;
            driver.trips += 1;
            driver.updated_at = Utc::now();
            driver.clone()
        };

        Ok(settle(&released))
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, AppError> {
        self.guard
            .lock()
            .map_err(|_| AppError::Internal("dispatch guard poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::Utc;

    use super::DispatchEngine;
    use crate::error::AppError;
    use crate::geo::LocationTable;
    use crate::models::driver::{Driver, DriverId, DriverStatus};
    use crate::models::location::LocationCode;
    use crate::models::profile::{Gender, Profile};

    fn code(raw: &str) -> LocationCode {
        LocationCode::parse(raw).unwrap()
    }

    fn locations() -> LocationTable {
        let mut table = LocationTable::new();
        for (name, distance) in [("A", 0), ("C", 4), ("D", 7), ("F", 9), ("B", 15), ("G", 18)] {
            table.insert(code(name), distance).unwrap();
        }
        table
    }

    fn driver(id: u32, at: &str, trips: u32) -> Driver {
        Driver {
            id: DriverId(id),
            profile: Profile::new(format!("driver-{id}"), 30, Gender::Male).unwrap(),
            password: "pw".to_string(),
            location: code(at),
            status: DriverStatus::Available,
            trips,
            updated_at: Utc::now(),
        }
    }

    fn engine(drivers: Vec<Driver>) -> DispatchEngine {
        let engine = DispatchEngine::new();
        for d in drivers {
            engine.register(d).unwrap();
        }
        engine
    }

    #[test]
    fn reserves_nearest_driver() {
        let engine = engine(vec![driver(1, "G", 0), driver(2, "D", 0)]);
        let reservation = engine.reserve(&locations(), &code("C"), |_| {}).unwrap();

        assert_eq!(reservation.driver.id, DriverId(2));
        assert_eq!(reservation.distance_to_pickup, 3);
        assert_eq!(engine.get(DriverId(2)).unwrap().status, DriverStatus::OnTrip);
        assert_eq!(engine.get(DriverId(1)).unwrap().status, DriverStatus::Available);
    }

    #[test]
    fn equal_distance_goes_to_driver_with_fewer_trips() {
        let mut table = locations();
        table.insert(code("L"), 1).unwrap();
        // L (1) and D (7) are both 3 away from C (4).
        let engine = engine(vec![driver(1, "L", 5), driver(2, "D", 2)]);
        let reservation = engine.reserve(&table, &code("C"), |_| {}).unwrap();

        assert_eq!(reservation.distance_to_pickup, 3);
        assert_eq!(reservation.driver.id, DriverId(2));
    }

    #[test]
    fn full_tie_goes_to_lowest_id() {
        let engine = engine(vec![driver(7, "D", 1), driver(3, "D", 1), driver(5, "D", 1)]);
        let reservation = engine.reserve(&locations(), &code("A"), |_| {}).unwrap();
        assert_eq!(reservation.driver.id, DriverId(3));
    }

    #[test]
    fn busy_drivers_are_skipped() {
        let engine = engine(vec![driver(1, "C", 0), driver(2, "G", 0)]);
        let table = locations();

        let first = engine.reserve(&table, &code("C"), |_| {}).unwrap();
        let second = engine.reserve(&table, &code("C"), |_| {}).unwrap();

        assert_eq!(first.driver.id, DriverId(1));
        assert_eq!(second.driver.id, DriverId(2));
        assert_eq!(
            engine.reserve(&table, &code("C"), |_| {}).unwrap_err(),
            AppError::NoDriverAvailable
        );
    }

    #[test]
    fn no_available_driver_leaves_state_untouched() {
        let engine = engine(vec![driver(1, "C", 0)]);
        let table = locations();
        engine.reserve(&table, &code("A"), |_| {}).unwrap();
        let before = engine.get(DriverId(1)).unwrap();

        assert_eq!(
            engine.reserve(&table, &code("A"), |_| {}).unwrap_err(),
            AppError::NoDriverAvailable
        );
        let after = engine.get(DriverId(1)).unwrap();
        assert_eq!(after.status, before.status);
        assert_eq!(after.trips, before.trips);
    }

    #[test]
    fn unknown_pickup_fails_before_any_reservation() {
        let engine = engine(vec![driver(1, "C", 0)]);
        assert!(matches!(
            engine.reserve(&locations(), &code("Z"), |_| {}),
            Err(AppError::UnknownLocation(_))
        ));
        assert_eq!(engine.on_trip_count(), 0);
    }

    #[test]
    fn completion_moves_driver_and_counts_trip() {
        let engine = engine(vec![driver(1, "A", 4)]);
        engine.reserve(&locations(), &code("A"), |_| {}).unwrap();

        let driver = engine.complete(DriverId(1), code("G"), Driver::clone).unwrap();

        assert_eq!(driver.location, code("G"));
        assert_eq!(driver.trips, 5);
        assert_eq!(driver.status, DriverStatus::Available);
    }

    #[test]
    fn completing_an_idle_driver_is_rejected() {
        let engine = engine(vec![driver(1, "A", 0)]);
        assert!(matches!(
            engine.complete(DriverId(1), code("C"), Driver::clone),
            Err(AppError::InvalidStateTransition(_))
        ));
        assert_eq!(engine.get(DriverId(1)).unwrap().trips, 0);
    }

    #[test]
    fn completing_an_unknown_driver_is_rejected() {
        let engine = engine(vec![]);
        assert_eq!(
            engine.complete(DriverId(42), code("C"), Driver::clone).unwrap_err(),
            AppError::DriverNotFound(DriverId(42))
        );
    }

    #[test]
    fn reservation_callback_runs_under_the_guard() {
        let engine = engine(vec![driver(1, "A", 0)]);
        let mut seen = None;

        engine
            .reserve(&locations(), &code("C"), |reservation| {
                assert!(engine.guard.try_lock().is_err());
                assert_eq!(engine.get(DriverId(1)).unwrap().status, DriverStatus::OnTrip);
                seen = Some(reservation.driver.id);
            })
            .unwrap();

        assert_eq!(seen, Some(DriverId(1)));
        assert!(engine.guard.try_lock().is_ok());
    }

    #[test]
    fn failed_reservation_skips_callback() {
        let engine = engine(vec![]);
        let mut called = false;

        let result = engine.reserve(&locations(), &code("C"), |_| called = true);

        assert_eq!(result.unwrap_err(), AppError::NoDriverAvailable);
        assert!(!called);
    }

    #[test]
    fn settlement_runs_under_the_guard_and_returns_its_value() {
        let engine = engine(vec![driver(1, "A", 2)]);
        engine.reserve(&locations(), &code("A"), |_| {}).unwrap();

        let trips = engine
            .complete(DriverId(1), code("D"), |released| {
                assert!(engine.guard.try_lock().is_err());
                assert_eq!(released.status, DriverStatus::Available);
                released.trips
            })
            .unwrap();

        assert_eq!(trips, 3);
        assert!(engine.guard.try_lock().is_ok());
    }

    #[test]
    fn rejected_completion_skips_settlement() {
        let engine = engine(vec![driver(1, "A", 0)]);
        let mut called = false;

        let result = engine.complete(DriverId(1), code("C"), |_| called = true);

        assert!(matches!(result, Err(AppError::InvalidStateTransition(_))));
        assert!(!called);
    }

    #[test]
    fn guarded_read_sees_pool_in_id_order() {
        let engine = engine(vec![driver(3, "A", 0), driver(1, "C", 0)]);
        let ids = engine
            .with_drivers(|drivers| {
                assert!(engine.guard.try_lock().is_err());
                drivers.iter().map(|driver| driver.id).collect::<Vec<_>>()
            })
            .unwrap();

        assert_eq!(ids, vec![DriverId(1), DriverId(3)]);
    }

    #[test]
    fn concurrent_requests_never_share_a_driver() {
        let engine = Arc::new(engine(vec![driver(1, "A", 0), driver(2, "C", 0)]));
        let table = Arc::new(locations());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let engine = engine.clone();
                let table = table.clone();
                thread::spawn(move || engine.reserve(&table, &code("D"), |_| {}))
            })
            .collect();

        let mut reserved: Vec<DriverId> = handles
            .into_iter()
            .filter_map(|handle| handle.join().unwrap().ok())
            .map(|reservation| reservation.driver.id)
            .collect();
        reserved.sort();

        assert_eq!(reserved, vec![DriverId(1), DriverId(2)]);
    }
}

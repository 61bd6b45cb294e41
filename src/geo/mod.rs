use std::collections::HashMap;

use crate::error::AppError;
use crate::engine::pricing::fare_for_distance;
use crate::models::location::{Location, LocationCode};

/// Named points on a single axis, each at a fixed distance from the origin.
///
/// `locations` is kept in ascending distance order at all times; a new
/// location lands after every existing one at the same or a smaller distance.
#[derive(Debug, Default, Clone)]
pub struct LocationTable {
    locations: Vec<Location>,
    index: HashMap<LocationCode, u32>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn distance_of(&self, code: &LocationCode) -> Result<u32, AppError> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| AppError::UnknownLocation(code.to_string()))
    }

    pub fn contains(&self, code: &LocationCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn insert(&mut self, code: LocationCode, distance: u32) -> Result<(), AppError> {
        if self.index.contains_key(&code) {
            return Err(AppError::DuplicateLocation(code.to_string()));
        }

        let position = self
            .locations
            .partition_point(|location| location.distance <= distance);
        self.index.insert(code.clone(), distance);
        self.locations.insert(position, Location { code, distance });

        Ok(())
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn distance_between(&self, a: &LocationCode, b: &LocationCode) -> Result<u32, AppError> {
        let from = self.distance_of(a)?;
        let to = self.distance_of(b)?;
        Ok(from.abs_diff(to))
    }

    pub fn fare(&self, source: &LocationCode, destination: &LocationCode) -> Result<u64, AppError> {
        self.distance_between(source, destination)
            .map(fare_for_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::LocationTable;
    use crate::error::AppError;
    use crate::models::location::LocationCode;

    fn code(raw: &str) -> LocationCode {
        LocationCode::parse(raw).unwrap()
    }

    fn table(points: &[(&str, u32)]) -> LocationTable {
        let mut table = LocationTable::new();
        for (name, distance) in points {
            table.insert(code(name), *distance).unwrap();
        }
        table
    }

    fn codes(table: &LocationTable) -> Vec<String> {
        table
            .all()
            .iter()
            .map(|location| location.code.to_string())
            .collect()
    }

    #[test]
    fn unknown_location_is_reported() {
        let table = table(&[("A", 0)]);
        assert_eq!(
            table.distance_of(&code("Z")),
            Err(AppError::UnknownLocation("Z".to_string()))
        );
    }

    #[test]
    fn duplicate_insert_is_rejected_and_table_unchanged() {
        let mut table = table(&[("A", 0), ("C", 4)]);
        let err = table.insert(code("C"), 10).unwrap_err();

        assert_eq!(err, AppError::DuplicateLocation("C".to_string()));
        assert_eq!(table.distance_of(&code("C")), Ok(4));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_keeps_ascending_distance_order() {
        let mut table = table(&[("A", 0), ("C", 4), ("D", 7), ("F", 9), ("G", 18)]);
        table.insert(code("B"), 15).unwrap();

        assert_eq!(codes(&table), vec!["A", "C", "D", "F", "B", "G"]);
        assert_eq!(table.distance_of(&code("B")), Ok(15));
    }

    #[test]
    fn insert_beyond_last_appends() {
        let mut table = table(&[("A", 0), ("C", 4), ("D", 7), ("F", 9)]);
        table.insert(code("B"), 15).unwrap();

        assert_eq!(codes(&table), vec!["A", "C", "D", "F", "B"]);
    }

    #[test]
    fn equal_distances_keep_insertion_order() {
        let mut table = table(&[("A", 0), ("X", 5), ("Z", 9)]);
        table.insert(code("Y"), 5).unwrap();
        table.insert(code("W"), 0).unwrap();

        assert_eq!(codes(&table), vec!["A", "W", "X", "Y", "Z"]);
    }

    #[test]
    fn fare_is_ten_per_unit_and_symmetric() {
        let table = table(&[("A", 0), ("C", 4), ("E", 23)]);

        assert_eq!(table.fare(&code("A"), &code("C")), Ok(40));
        assert_eq!(table.fare(&code("C"), &code("A")), Ok(40));
        assert_eq!(table.fare(&code("E"), &code("C")), Ok(190));
        assert_eq!(table.fare(&code("C"), &code("C")), Ok(0));
    }

    #[test]
    fn fare_for_unknown_endpoint_fails() {
        let table = table(&[("A", 0)]);
        assert!(matches!(
            table.fare(&code("A"), &code("Q")),
            Err(AppError::UnknownLocation(_))
        ));
    }
}

pub mod booking;
pub mod customer;
pub mod driver;
pub mod location;
pub mod profile;
pub mod trip;

use crate::models::customer::CustomerId;
use crate::models::driver::DriverId;

/// Proof that a customer authenticated. Only `TaxiService` can mint one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerHandle {
    id: CustomerId,
}

impl CustomerHandle {
    pub(super) fn new(id: CustomerId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverHandle {
    id: DriverId,
}

impl DriverHandle {
    pub(super) fn new(id: DriverId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> DriverId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminHandle {
    _private: (),
}

impl AdminHandle {
    pub(super) fn new() -> Self {
        Self { _private: () }
    }
}

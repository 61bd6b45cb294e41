use std::sync::atomic::{AtomicU64, Ordering};

/// Running total of platform commission. Only ever grows.
#[derive(Debug, Default)]
pub struct RevenueAggregator {
    total: AtomicU64,
}

impl RevenueAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&self, commission: u64) {
        self.total.fetch_add(commission, Ordering::AcqRel);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }
}

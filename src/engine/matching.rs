use crate::models::driver::DriverId;

/// An available driver as seen from one pickup point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub driver_id: DriverId,
    pub distance: u32,
    pub trips: u32,
}

impl Candidate {
    fn rank(&self) -> (u32, u32) {
        (self.distance, self.trips)
    }
}

/// Picks the nearest candidate, preferring fewer trips on equal distance.
///
/// Candidates are visited in the order given and only a strictly better rank
/// replaces the current best, so full ties go to the earliest candidate.
pub fn select_driver<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates
        .into_iter()
        .fold(None, |best: Option<Candidate>, candidate| match best {
            Some(current) if current.rank() <= candidate.rank() => Some(current),
            _ => Some(candidate),
        })
}

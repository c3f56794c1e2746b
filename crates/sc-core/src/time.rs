//! Wall-clock deadline for bounding graph traversal.

use std::time::{Duration, Instant};

/// Optional overall deadline for one engine call.
///
/// Scoring on a regional network is normally sub-second, but a radius
/// that covers a whole country can settle millions of nodes per
/// candidate.  Callers that need a bound pass `Deadline::after(..)`; the
/// default never expires.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    pub const fn none() -> Self {
        Self { at: None }
    }

    pub fn after(budget: Duration) -> Self {
        Self { at: Some(Instant::now() + budget) }
    }

    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left before expiry; `None` for an unbounded deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }
}

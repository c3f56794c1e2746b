//! Travel speed and distance unit helpers.

use crate::error::{CoreResult, require_positive};

/// Metres in one statute mile.
pub const METRES_PER_MILE: f64 = 1_609.34;

/// Convert statute miles to metres.
#[inline]
pub fn miles_to_metres(miles: f64) -> f64 {
    miles * METRES_PER_MILE
}

/// Round to the nearest integer, halves away from zero (`2.5 → 3`, `-2.5 → -3`).
#[inline]
pub fn round_half_away(x: f64) -> i64 {
    x.round() as i64
}

/// A travel speed, stored as metres per second.
///
/// Edge lengths are metres, so `distance_m / speed` is always seconds no
/// matter which constructor the caller used.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speed {
    metres_per_sec: f64,
}

impl Speed {
    pub fn from_mps(metres_per_sec: f64) -> Self {
        Self { metres_per_sec }
    }

    pub fn from_kmh(kmh: f64) -> Self {
        Self::from_mps(kmh * 1_000.0 / 3_600.0)
    }

    pub fn from_mph(mph: f64) -> Self {
        Self::from_mps(mph * METRES_PER_MILE / 3_600.0)
    }

    /// Speed expressed as metres per hour (handy for toy networks).
    pub fn metres_per_hour(metres: f64) -> Self {
        Self::from_mps(metres / 3_600.0)
    }

    #[inline]
    pub fn as_mps(self) -> f64 {
        self.metres_per_sec
    }

    /// Seconds needed to cover `distance_m` at this speed.
    #[inline]
    pub fn travel_secs(self, distance_m: f64) -> f64 {
        distance_m / self.metres_per_sec
    }

    /// Returns `self` if the speed is positive and finite.
    pub fn validated(self) -> CoreResult<Self> {
        require_positive("speed", self.metres_per_sec).map(|_| self)
    }
}

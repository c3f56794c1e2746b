//! Indicative travel times for a straight distance, shown next to a site.

use sc_core::METRES_PER_MILE;

pub const WALKING_MPH: f64 = 3.0;
pub const PEAK_DRIVING_MPH: f64 = 15.0;
pub const OFF_PEAK_DRIVING_MPH: f64 = 25.0;

/// Minutes to cover `miles` by each mode.  The distance is rounded to two
/// decimal places first.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelTimes {
    pub miles:                    f64,
    pub walking_minutes:          f64,
    pub peak_driving_minutes:     f64,
    pub off_peak_driving_minutes: f64,
}

impl TravelTimes {
    pub fn from_miles(miles: f64) -> Self {
        let miles = (miles * 100.0).round() / 100.0;
        let minutes = |mph: f64| miles / mph * 60.0;
        Self {
            miles,
            walking_minutes:          minutes(WALKING_MPH),
            peak_driving_minutes:     minutes(PEAK_DRIVING_MPH),
            off_peak_driving_minutes: minutes(OFF_PEAK_DRIVING_MPH),
        }
    }

    pub fn from_metres(metres: f64) -> Self {
        Self::from_miles(metres / METRES_PER_MILE)
    }
}

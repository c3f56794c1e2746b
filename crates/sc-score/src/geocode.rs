//! Address lookup.
//!
//! Geocoding services live outside this crate; callers plug one in through
//! [`Geocoder`].  [`StaticGeocoder`] is a fixed lookup table for tests and
//! offline runs.

use std::collections::HashMap;

use sc_core::GeoPoint;
use tracing::debug;

use crate::error::{ScoreError, ScoreResult};
use crate::sites::Candidate;

/// Resolves a free-text address to a point.
pub trait Geocoder {
    /// `None` if the address is unknown.
    fn geocode(&self, address: &str) -> Option<GeoPoint>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Option<GeoPoint>,
{
    fn geocode(&self, address: &str) -> Option<GeoPoint> {
        self(address)
    }
}

/// Geocode one address.  Blank input is rejected before the geocoder is
/// consulted.
pub fn locate(geocoder: &dyn Geocoder, address: &str) -> ScoreResult<GeoPoint> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ScoreError::invalid("no address entered"));
    }
    let point = geocoder
        .geocode(address)
        .ok_or_else(|| ScoreError::Geocode(address.to_owned()))?;
    debug!(address, %point, "geocoded");
    Ok(point)
}

/// Geocode each address into an unnamed [`Candidate`].  The first failure
/// aborts the batch.
pub fn candidates_from_addresses<S: AsRef<str>>(
    geocoder: &dyn Geocoder,
    addresses: &[S],
) -> ScoreResult<Vec<Candidate>> {
    addresses
        .iter()
        .map(|a| {
            let position = locate(geocoder, a.as_ref())?;
            Ok(Candidate { name: None, address: Some(a.as_ref().trim().to_owned()), position })
        })
        .collect()
}

// ── StaticGeocoder ────────────────────────────────────────────────────────────

/// Case- and whitespace-insensitive lookup table.
#[derive(Clone, Debug, Default)]
pub struct StaticGeocoder {
    entries: HashMap<String, GeoPoint>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: &str, point: GeoPoint) {
        self.entries.insert(normalise(address), point);
    }

    pub fn with(mut self, address: &str, point: GeoPoint) -> Self {
        self.insert(address, point);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> Option<GeoPoint> {
        self.entries.get(&normalise(address)).copied()
    }
}

fn normalise(address: &str) -> String {
    address.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

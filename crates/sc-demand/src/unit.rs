//! Areal demand units.

use sc_core::{CoreError, GeoPoint};

use crate::{DemandResult, Geometry};

/// Resident population of a unit, which the source data may lack.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Population {
    Known(u64),
    #[default]
    Unknown,
}

impl Population {
    pub fn known(self) -> Option<u64> {
        match self {
            Population::Known(n) => Some(n),
            Population::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Population::Known(_))
    }
}

impl From<Option<u64>> for Population {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Population::Unknown, Population::Known)
    }
}

/// One areal unit: code, population, and boundary.
///
/// The centroid is derived once at construction; units are read-only
/// inputs to every query afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct DemandUnit {
    pub code:       String,
    pub population: Population,
    pub geometry:   Geometry,
    centroid:       GeoPoint,
}

impl DemandUnit {
    /// Fails if `code` is blank or the geometry has no centroid (empty).
    pub fn new(
        code: impl Into<String>,
        population: Population,
        geometry: Geometry,
    ) -> DemandResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(CoreError::InvalidInput("demand unit code is empty".into()).into());
        }
        let centroid = geometry
            .centroid()
            .filter(|c| c.is_valid())
            .ok_or_else(|| CoreError::InvalidInput(format!("unit {code} has empty geometry")))?;
        Ok(Self { code, population, geometry, centroid })
    }

    pub fn centroid(&self) -> GeoPoint {
        self.centroid
    }

    pub fn with_population(mut self, population: Population) -> Self {
        self.population = population;
        self
    }
}

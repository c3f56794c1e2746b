//! Where demand units come from.
//!
//! Reading boundary files is outside the engine; callers plug their loader
//! in through [`DemandSource`].  [`InMemoryDemandSource`] backs tests and
//! the demo.

use std::collections::HashMap;

use sc_core::CoreError;

use crate::{DemandError, DemandResult, DemandUnit};

/// Supplies the demand units of a named region.
pub trait DemandSource {
    fn for_region(&self, region: &str) -> DemandResult<Vec<DemandUnit>>;
}

/// Units registered per region up front.
#[derive(Default)]
pub struct InMemoryDemandSource {
    regions: HashMap<String, Vec<DemandUnit>>,
}

impl InMemoryDemandSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: impl Into<String>, units: Vec<DemandUnit>) {
        self.regions.insert(region.into(), units);
    }

    pub fn with_region(mut self, region: impl Into<String>, units: Vec<DemandUnit>) -> Self {
        self.insert(region, units);
        self
    }
}

impl DemandSource for InMemoryDemandSource {
    fn for_region(&self, region: &str) -> DemandResult<Vec<DemandUnit>> {
        let region = region.trim();
        if region.is_empty() {
            return Err(CoreError::InvalidInput("no region given".into()).into());
        }
        self.regions
            .get(region)
            .cloned()
            .ok_or_else(|| DemandError::UnknownRegion(region.to_owned()))
    }
}

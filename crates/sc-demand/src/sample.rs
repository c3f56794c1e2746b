//! Records produced by demand selection.
//!
//! All records are created once and appended to ordered `Vec`s; nothing
//! mutates them afterwards.

use std::collections::HashSet;

use sc_core::{Diagnostic, GeoPoint, NodeId};

use crate::Population;

/// A unit selected in radius mode, with its centroid snapped to the graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedUnit {
    pub code:       String,
    pub population: Population,
    pub centroid:   GeoPoint,
    /// Nearest road node to the centroid.
    pub node:       NodeId,
    /// Great-circle distance from the query origin to the centroid.
    pub geodesic_m: f64,
    /// `geodesic_m <= radius`.  Independent of network reachability.
    pub in_radius:  bool,
}

/// One road node inside a sampled unit, carrying that unit's population.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandSample {
    pub unit_code:  String,
    pub node:       NodeId,
    pub population: Population,
}

/// Samples gathered around one candidate site.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSamples {
    pub candidate_node: NodeId,
    /// Codes of the units selected by the circle test, in input order.
    pub units:          Vec<String>,
    /// Samples in unit order, then ascending `NodeId` within a unit.
    pub samples:        Vec<DemandSample>,
    pub diagnostics:    Vec<Diagnostic>,
}

impl CandidateSamples {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.samples.iter().map(|s| s.node).collect()
    }

    /// Sum of known populations over the distinct units that contributed
    /// at least one sample.  A unit sampled at many nodes counts once.
    pub fn sampled_population(&self) -> u64 {
        let mut seen: HashSet<&str> = HashSet::new();
        self.samples
            .iter()
            .filter(|s| seen.insert(s.unit_code.as_str()))
            .filter_map(|s| s.population.known())
            .sum()
    }
}

//! Population-weighted coverage around a single origin.
//!
//! Units whose centroid lies within the radius each contribute their known
//! population to `population_covered`.  The average travel time weights
//! every reachable, populated unit's network travel time by its population.

use sc_core::{Deadline, Diagnostic, GeoPoint, NodeId, Speed, round_half_away};
use sc_demand::{DemandIndex, DemandUnit, Population, ResolvedUnit};
use sc_spatial::{PathDistance, RoadNetwork, ShortestPathEngine};
use tracing::{debug, info, warn};

use crate::error::{ScoreError, ScoreResult, check_unique};

// ── Result types ──────────────────────────────────────────────────────────────

/// Population-weighted average travel time, in whole minutes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Average {
    Defined(i64),
    /// Nothing to average: no reachable unit with a known population.
    Undefined,
}

impl Average {
    pub fn minutes(self) -> Option<i64> {
        match self {
            Average::Defined(m) => Some(m),
            Average::Undefined => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageResult {
    pub avg_travel_time_minutes: Average,
    pub population_covered:      u64,
}

/// Everything `compute_coverage` worked out, for display and auditing.
#[derive(Clone, Debug)]
pub struct CoverageReport {
    pub result:      CoverageResult,
    /// Road node the origin snapped to.
    pub origin_node: NodeId,
    /// In-radius units, in input order.
    pub units:       Vec<ResolvedUnit>,
    /// Network distance from `origin_node` to each entry of `units`.
    pub distances:   Vec<PathDistance>,
    pub diagnostics: Vec<Diagnostic>,
}

// ── CoverageScorer ────────────────────────────────────────────────────────────

/// Pure aggregation step: no graph access, just resolved units and the
/// distances already computed for them.
#[derive(Copy, Clone, Debug)]
pub struct CoverageScorer {
    speed: Speed,
}

impl CoverageScorer {
    pub fn new(speed: Speed) -> ScoreResult<Self> {
        Ok(Self { speed: speed.validated()? })
    }

    /// Aggregate `units` (all treated as in radius) with the matching
    /// `distances` from `origin_node`.
    ///
    /// The result does not depend on the order of `units`: contributions
    /// are summed in unit-code order.
    pub fn score(
        &self,
        origin_node: NodeId,
        units: &[ResolvedUnit],
        distances: &[PathDistance],
    ) -> ScoreResult<(CoverageResult, Vec<Diagnostic>)> {
        if units.len() != distances.len() {
            return Err(ScoreError::invalid(format!(
                "{} units but {} distances",
                units.len(),
                distances.len()
            )));
        }

        let mut diagnostics = Vec::new();
        let mut population_covered = 0u64;
        // (code, travel_secs * population, population)
        let mut weighted: Vec<(&str, f64, u64)> = Vec::with_capacity(units.len());

        for (unit, dist) in units.iter().zip(distances) {
            let pop = match unit.population {
                Population::Known(p) => p,
                Population::Unknown => {
                    diagnostics.push(Diagnostic::UnknownPopulation { unit: unit.code.clone() });
                    continue;
                }
            };
            population_covered += pop;

            match dist {
                PathDistance::Finite(d) => {
                    let secs = self.speed.travel_secs(*d);
                    weighted.push((unit.code.as_str(), secs * pop as f64, pop));
                }
                PathDistance::Unreachable => {
                    diagnostics.push(Diagnostic::UnreachableDestination {
                        from: origin_node,
                        to:   unit.node,
                        unit: Some(unit.code.clone()),
                    });
                }
            }
        }

        weighted.sort_by(|a, b| a.0.cmp(b.0).then(a.1.total_cmp(&b.1)).then(a.2.cmp(&b.2)));
        let numerator: f64 = weighted.iter().map(|w| w.1).sum();
        let denominator: u64 = weighted.iter().map(|w| w.2).sum();

        let avg_travel_time_minutes = if denominator == 0 {
            Average::Undefined
        } else {
            Average::Defined(round_half_away(numerator / denominator as f64 / 60.0))
        };

        Ok((CoverageResult { avg_travel_time_minutes, population_covered }, diagnostics))
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Coverage of `units` from `origin` within `radius_m`, travelling over
/// `network` at `speed`.
///
/// One outbound search from the snapped origin resolves every unit; it
/// stops as soon as all unit nodes are settled.  Unreachable units and
/// units without a population figure are skipped and reported in
/// `CoverageReport::diagnostics`.  Unit codes must be unique.
pub fn compute_coverage(
    network: &RoadNetwork,
    units: &[DemandUnit],
    origin: GeoPoint,
    radius_m: f64,
    speed: Speed,
    deadline: Deadline,
) -> ScoreResult<CoverageReport> {
    let scorer = CoverageScorer::new(speed)?;
    check_unique("unit code", units.iter().map(|u| u.code.as_str()))?;
    let origin_node = network.snap(origin)?;

    let index = DemandIndex::new(network, units);
    let in_radius: Vec<ResolvedUnit> = index
        .units_within(origin, radius_m)?
        .into_iter()
        .filter(|u| u.in_radius)
        .collect();

    // An empty target list would make the engine settle the whole graph.
    let targets: Vec<NodeId> = in_radius.iter().map(|u| u.node).collect();
    let distances = if targets.is_empty() {
        Vec::new()
    } else {
        let tree = ShortestPathEngine::new(network).deadline(deadline).run(origin_node, &targets)?;
        debug!(%origin_node, targets = targets.len(), settled = tree.settled_count(), "coverage search done");
        tree.distances(&targets)
    };

    let (result, diagnostics) = scorer.score(origin_node, &in_radius, &distances)?;
    for d in &diagnostics {
        warn!(%d, "coverage item skipped");
    }
    info!(
        %origin,
        radius_m,
        units = in_radius.len(),
        population = result.population_covered,
        avg_minutes = ?result.avg_travel_time_minutes.minutes(),
        "coverage computed"
    );

    Ok(CoverageReport { result, origin_node, units: in_radius, distances, diagnostics })
}

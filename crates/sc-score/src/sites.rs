//! Scoring a batch of candidate sites.
//!
//! Each candidate is independent: snap, sample, one inbound search, score.
//! With the `parallel` feature the candidates run on Rayon's pool; results
//! are always returned in input order.

use sc_core::{Deadline, Diagnostic, GeoPoint, NodeId, ScoringConfig};
use sc_demand::{CandidateSamples, DemandIndex, DemandUnit};
use sc_spatial::{Route, RouteCollector, RoadNetwork, SearchDirection, ShortestPathEngine};
use tracing::{debug, info, warn};

use crate::error::{ScoreError, ScoreResult, check_unique};
use crate::suitability::{SiteScore, SuitabilityScorer};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// A proposed site.  Unnamed candidates are labelled `"Site N"` (1-based,
/// by position in the input list).
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub name:     Option<String>,
    /// Address the position was geocoded from, if any.
    pub address:  Option<String>,
    pub position: GeoPoint,
}

impl Candidate {
    pub fn new(position: GeoPoint) -> Self {
        Self { name: None, address: None, position }
    }

    pub fn named(name: impl Into<String>, position: GeoPoint) -> Self {
        Self { name: Some(name.into()), address: None, position }
    }

    fn label(&self, index: usize) -> String {
        match &self.name {
            Some(n) => n.clone(),
            None => format!("Site {}", index + 1),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SiteOptions {
    /// Reconstruct each sample's route to its candidate.
    pub collect_routes: bool,
    /// Applied to every candidate's search.
    pub deadline:       Deadline,
}

// ── Outputs ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SiteReport {
    pub name:        String,
    pub address:     Option<String>,
    pub position:    GeoPoint,
    /// Road node the candidate snapped to.
    pub node:        NodeId,
    pub score:       SiteScore,
    pub samples:     CandidateSamples,
    /// Sample-to-candidate routes, when requested.  Unreachable samples
    /// have none.
    pub routes:      Vec<Route>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-site results, in candidate order.
#[derive(Clone, Debug, Default)]
pub struct SiteScores {
    pub sites: Vec<SiteReport>,
}

impl SiteScores {
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SiteReport> {
        self.sites.iter().find(|s| s.name == name)
    }

    pub fn score_of(&self, name: &str) -> Option<f64> {
        self.get(name).map(|s| s.score.value)
    }

    /// `(name, score)` pairs in candidate order.
    pub fn scores(&self) -> Vec<(&str, f64)> {
        self.sites.iter().map(|s| (s.name.as_str(), s.score.value)).collect()
    }

    /// Highest-scoring site; the earliest candidate wins ties.
    pub fn best(&self) -> Option<&SiteReport> {
        self.sites.iter().reduce(|best, s| if s.score.value > best.score.value { s } else { best })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Score every candidate against `units` within `radius_m`.
///
/// Fails on malformed input (empty candidate list, duplicate site names or
/// unit codes, bad config or radius) or when a search exceeds the deadline.  Per-sample
/// problems are recorded on the affected `SiteReport`.
pub fn compute_site_scores(
    network: &RoadNetwork,
    units: &[DemandUnit],
    candidates: &[Candidate],
    radius_m: f64,
    config: &ScoringConfig,
    options: SiteOptions,
) -> ScoreResult<SiteScores> {
    if candidates.is_empty() {
        return Err(ScoreError::invalid("no candidate sites"));
    }
    let scorer = SuitabilityScorer::new(config)?;
    let names: Vec<String> = candidates.iter().enumerate().map(|(i, c)| c.label(i)).collect();
    check_unique("site name", names.iter().map(String::as_str))?;
    check_unique("unit code", units.iter().map(|u| u.code.as_str()))?;

    let index = DemandIndex::new(network, units);
    let ctx = SiteContext { network, index: &index, scorer: &scorer, radius_m, config, options: &options };

    #[cfg(feature = "parallel")]
    let sites = {
        use rayon::prelude::*;

        candidates
            .par_iter()
            .zip(names.into_par_iter())
            .map(|(cand, name)| ctx.score_one(cand, name))
            .collect::<ScoreResult<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let sites = candidates
        .iter()
        .zip(names)
        .map(|(cand, name)| ctx.score_one(cand, name))
        .collect::<ScoreResult<Vec<_>>>()?;

    Ok(SiteScores { sites })
}

/// Read-only state shared by every candidate.
struct SiteContext<'a> {
    network:  &'a RoadNetwork,
    index:    &'a DemandIndex<'a>,
    scorer:   &'a SuitabilityScorer<'a>,
    radius_m: f64,
    config:   &'a ScoringConfig,
    options:  &'a SiteOptions,
}

impl SiteContext<'_> {
    fn score_one(&self, cand: &Candidate, name: String) -> ScoreResult<SiteReport> {
        let node = self.network.snap(cand.position)?;
        let samples = self.index.sample_candidate(
            cand.position,
            node,
            self.radius_m,
            self.config.circle_vertices,
        )?;

        // Distances run sample → candidate, so search the reverse graph
        // from the candidate.
        let targets = samples.nodes();
        let (distances, routes) = if targets.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let tree = ShortestPathEngine::new(self.network)
                .direction(SearchDirection::Inbound)
                .deadline(self.options.deadline)
                .with_predecessors(self.options.collect_routes)
                .run(node, &targets)?;
            debug!(site = %name, %node, settled = tree.settled_count(), "site search done");
            let routes = if self.options.collect_routes {
                RouteCollector::new(self.network, &tree).collect(&targets)
            } else {
                Vec::new()
            };
            (tree.distances(&targets), routes)
        };

        let (score, scorer_diags) = self.scorer.score(&samples, &distances)?;

        let mut diagnostics = samples.diagnostics.clone();
        diagnostics.extend(scorer_diags);
        for d in &diagnostics {
            warn!(site = %name, %d, "sample skipped");
        }
        info!(
            site = %name,
            score = score.value,
            scored = score.samples_scored,
            samples = score.samples_total,
            "site scored"
        );

        Ok(SiteReport {
            name,
            address: cand.address.clone(),
            position: cand.position,
            node,
            score,
            samples,
            routes,
            diagnostics,
        })
    }
}

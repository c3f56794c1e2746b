//! `sc-score` — coverage and site-suitability scoring.
//!
//! # Pipeline
//!
//! ```text
//! coverage : origin ─► DemandIndex::units_within ─► outbound Dijkstra
//!                     ─► CoverageScorer  ─► CoverageResult
//! sites    : candidate ─► DemandIndex::sample_candidate ─► inbound Dijkstra
//!                     ─► SuitabilityScorer ─► SiteScore  (+ RouteCollector)
//! ```
//!
//! Per-item problems (unreachable node, unknown population) never abort a
//! call; they are skipped and listed as [`Diagnostic`](sc_core::Diagnostic)s
//! on the report.  Only malformed top-level input is an error.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores candidate sites on Rayon's thread pool.         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on result types.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sc_core::{Deadline, ScoringConfig, Speed, miles_to_metres};
//! use sc_score::{Candidate, SiteOptions, compute_coverage, compute_site_scores};
//!
//! let cov = compute_coverage(&net, &units, origin, miles_to_metres(2.0),
//!                            Speed::from_mph(20.0), Deadline::none())?;
//! let sites = compute_site_scores(&net, &units, &candidates, 1_000.0,
//!                                 &ScoringConfig::default(), SiteOptions::default())?;
//! ```

pub mod coverage;
pub mod error;
pub mod geocode;
pub mod sites;
pub mod suitability;
pub mod travel;

#[cfg(test)]
mod tests;

pub use coverage::{Average, CoverageReport, CoverageResult, CoverageScorer, compute_coverage};
pub use error::{ScoreError, ScoreResult};
pub use geocode::{Geocoder, StaticGeocoder, candidates_from_addresses, locate};
pub use sites::{Candidate, SiteOptions, SiteReport, SiteScores, compute_site_scores};
pub use suitability::{SiteScore, SuitabilityScorer};
pub use travel::TravelTimes;

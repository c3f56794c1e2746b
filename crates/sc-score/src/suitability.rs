//! Comparative suitability score for one candidate site.
//!
//! Every candidate starts at `ScoringConfig::baseline`.  Each scorable
//! sample subtracts
//!
//! ```text
//! walking_minutes(distance) × (1 − unit_population / sampled_population) × scale_factor
//! ```
//!
//! so distant samples cost more, and samples from a unit holding most of
//! the sampled population cost less.  Scores are only meaningful relative
//! to other candidates scored with the same config.

use sc_core::{DeductionMode, Diagnostic, ScoringConfig};
use sc_demand::CandidateSamples;
use sc_spatial::PathDistance;

use crate::error::{ScoreError, ScoreResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteScore {
    pub value:            f64,
    /// Samples that subtracted a deduction.
    pub samples_scored:   usize,
    /// Samples offered to the scorer, scorable or not.
    pub samples_total:    usize,
    /// Sum of known populations over the distinct sampled units.
    pub total_population: u64,
}

pub struct SuitabilityScorer<'c> {
    config: &'c ScoringConfig,
}

impl<'c> SuitabilityScorer<'c> {
    pub fn new(config: &'c ScoringConfig) -> ScoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Walking minutes for `distance_m` at the configured speed.
    #[inline]
    fn walking_minutes(&self, distance_m: f64) -> f64 {
        (distance_m / 1_000.0) / self.config.walking_speed_kmh * 60.0
    }

    /// Score `samples`, where `distances[i]` is the network distance from
    /// sample `i` to the candidate node.
    ///
    /// Samples with unknown population are skipped silently (the sampler
    /// already reported them).  Unreachable samples are skipped with an
    /// `UnreachableDestination` diagnostic.
    pub fn score(
        &self,
        samples: &CandidateSamples,
        distances: &[PathDistance],
    ) -> ScoreResult<(SiteScore, Vec<Diagnostic>)> {
        if samples.samples.len() != distances.len() {
            return Err(ScoreError::invalid(format!(
                "{} samples but {} distances",
                samples.samples.len(),
                distances.len()
            )));
        }

        let total = samples.sampled_population();
        let mut value = self.config.baseline;
        let mut scored = 0usize;
        let mut diagnostics = Vec::new();

        for (sample, dist) in samples.samples.iter().zip(distances) {
            let Some(pop) = sample.population.known() else {
                continue;
            };
            let Some(d) = dist.metres() else {
                diagnostics.push(Diagnostic::UnreachableDestination {
                    from: sample.node,
                    to:   samples.candidate_node,
                    unit: Some(sample.unit_code.clone()),
                });
                continue;
            };

            // Clamped so a score never rises above its baseline.
            let multiplier = if total == 0 { 1.0 } else { (1.0 - pop as f64 / total as f64).max(0.0) };
            value -= self.walking_minutes(d) * multiplier * self.config.scale_factor;
            scored += 1;

            if self.config.deduction_mode == DeductionMode::FirstSampleOnly {
                break;
            }
        }

        let score = SiteScore {
            value,
            samples_scored: scored,
            samples_total: samples.samples.len(),
            total_population: total,
        };
        Ok((score, diagnostics))
    }
}

//! Suitability scoring configuration.

use crate::error::{CoreError, CoreResult, require_positive};

/// How many samples contribute a deduction to a candidate's score.
///
/// `FirstSampleOnly` matches scores published by earlier dashboard
/// releases, which stopped after one deduction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeductionMode {
    /// Every scorable sample subtracts its deduction.
    #[default]
    AllSamples,
    /// Only the first scorable sample subtracts its deduction.
    FirstSampleOnly,
}

/// Constants used by the suitability scorer.
///
/// Typically built with `Default` and tweaked by the dashboard layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringConfig {
    /// Starting score of every candidate.  Default: 1000.
    pub baseline: f64,

    /// Multiplier applied to each sample's walking minutes.  Default: 5.
    pub scale_factor: f64,

    /// Walking speed used to turn sample distances into minutes.
    /// Default: 4.5 km/h.
    pub walking_speed_kmh: f64,

    /// Number of vertices in the geodesic circle drawn around each
    /// candidate.  Default: 180.
    pub circle_vertices: usize,

    /// Which samples contribute deductions.
    pub deduction_mode: DeductionMode,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baseline:          1_000.0,
            scale_factor:      5.0,
            walking_speed_kmh: 4.5,
            circle_vertices:   180,
            deduction_mode:    DeductionMode::default(),
        }
    }
}

impl ScoringConfig {
    /// Check every constant is usable before any graph work starts.
    pub fn validate(&self) -> CoreResult<()> {
        require_positive("baseline", self.baseline)?;
        require_positive("scale factor", self.scale_factor)?;
        require_positive("walking speed", self.walking_speed_kmh)?;
        if self.circle_vertices < 3 {
            return Err(CoreError::InvalidInput(format!(
                "circle needs at least 3 vertices, got {}",
                self.circle_vertices
            )));
        }
        Ok(())
    }

    pub fn with_deduction_mode(mut self, mode: DeductionMode) -> Self {
        self.deduction_mode = mode;
        self
    }
}

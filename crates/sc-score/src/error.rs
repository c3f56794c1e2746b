use std::collections::HashSet;

use sc_core::CoreError;
use sc_demand::DemandError;
use sc_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Demand(#[from] DemandError),

    #[error("address could not be found: {0:?}")]
    Geocode(String),
}

impl ScoreError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ScoreError::Core(CoreError::InvalidInput(msg.into()))
    }

    /// `true` for malformed top-level input (as opposed to graph or data
    /// failures).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ScoreError::Core(CoreError::InvalidInput(_))
                | ScoreError::Spatial(SpatialError::Core(CoreError::InvalidInput(_)))
                | ScoreError::Demand(DemandError::Core(CoreError::InvalidInput(_)))
        )
    }
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Reject the first repeated item, naming it as `what`.
pub(crate) fn check_unique<'a>(what: &str, items: impl IntoIterator<Item = &'a str>) -> ScoreResult<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(ScoreError::invalid(format!("duplicate {what} {item:?}")));
        }
    }
    Ok(())
}

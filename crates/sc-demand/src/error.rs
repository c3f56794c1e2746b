use thiserror::Error;

use sc_core::CoreError;
use sc_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("population table parse error: {0}")]
    Parse(String),

    #[error("unknown region {0:?}")]
    UnknownRegion(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DemandResult<T> = Result<T, DemandError>;

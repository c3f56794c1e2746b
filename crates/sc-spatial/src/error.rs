//! Spatial-subsystem error type.

use thiserror::Error;

use sc_core::{CoreError, NodeId};

/// Errors produced by `sc-spatial`.
///
/// An unreachable destination is *not* an error: searches report it as
/// [`PathDistance::Unreachable`](crate::PathDistance::Unreachable).
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("duplicate node identifier {0}")]
    DuplicateNode(u64),

    #[error("edge {from} -> {to} has invalid length {length_m}")]
    InvalidEdgeLength { from: NodeId, to: NodeId, length_m: f64 },

    #[error("network has no nodes")]
    EmptyNetwork,

    #[error("shortest-path search from {origin} exceeded its deadline after settling {settled} nodes")]
    DeadlineExceeded { origin: NodeId, settled: usize },

    #[error("failed to build network for region {region:?}: {reason}")]
    Build { region: String, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

//! Per-item failures that are absorbed rather than aborting a query.

use std::fmt;

use crate::NodeId;

/// A recorded, non-fatal problem encountered while scoring.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// No path exists between the two nodes.  `unit` names the areal unit
    /// the destination belongs to, when known.
    UnreachableDestination {
        from: NodeId,
        to:   NodeId,
        unit: Option<String>,
    },

    /// The areal unit has no population figure; it was excluded from
    /// population-weighted sums.
    UnknownPopulation { unit: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnreachableDestination { from, to, unit: Some(u) } => {
                write!(f, "no path from {from} to {to} (unit {u})")
            }
            Diagnostic::UnreachableDestination { from, to, unit: None } => {
                write!(f, "no path from {from} to {to}")
            }
            Diagnostic::UnknownPopulation { unit } => {
                write!(f, "population unknown for unit {unit}")
            }
        }
    }
}

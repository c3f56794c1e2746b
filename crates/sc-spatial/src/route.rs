//! Route reconstruction for map rendering.
//!
//! Scores only need distances; the dashboard additionally draws each
//! sample's path to its candidate.  [`RouteCollector`] turns the
//! predecessor links of a [`ShortestPathTree`] into node sequences.

use sc_core::{GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::shortest_path::{PathDistance, ShortestPathTree};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The node sequence of one shortest path and its length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Nodes in travel order, endpoints included.
    pub nodes: Vec<NodeId>,
    /// Total length in metres.
    pub length_m: f64,
}

impl Route {
    /// `true` if the path starts and ends at the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Coordinates of each node, for drawing the route as a polyline.
    pub fn positions(&self, network: &RoadNetwork) -> Vec<GeoPoint> {
        self.nodes
            .iter()
            .filter_map(|&n| network.position(n))
            .collect()
    }
}

// ── RouteCollector ────────────────────────────────────────────────────────────

/// Collects routes between a search source and a set of endpoints.
pub struct RouteCollector<'a> {
    network: &'a RoadNetwork,
    tree:    &'a ShortestPathTree,
}

impl<'a> RouteCollector<'a> {
    pub fn new(network: &'a RoadNetwork, tree: &'a ShortestPathTree) -> Self {
        Self { network, tree }
    }

    /// Route for a single endpoint; `None` when it is unreachable or the
    /// tree was built without predecessors.
    pub fn route(&self, endpoint: NodeId) -> Option<Route> {
        let PathDistance::Finite(length_m) = self.tree.distance(endpoint) else {
            return None;
        };
        let nodes = self.tree.path(self.network, endpoint)?;
        Some(Route { nodes, length_m })
    }

    /// Routes for `endpoints`, in the order given.  Endpoints without a
    /// path are omitted.
    pub fn collect(&self, endpoints: &[NodeId]) -> Vec<Route> {
        endpoints.iter().filter_map(|&n| self.route(n)).collect()
    }
}

//! One-to-many shortest paths (Dijkstra) over the CSR road graph.
//!
//! # Cost units
//!
//! Costs are edge lengths in **metres** (`f64`).  Converting to travel time
//! is the scorer's job, since the right speed depends on the query.
//!
//! # Determinism
//!
//! The frontier is keyed by `(distance, NodeId)`, so nodes at equal
//! distance are settled in ascending `NodeId` order and predecessor links
//! only change on a strict improvement.  Identical inputs therefore give
//! bit-identical distances and paths.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use sc_core::{Deadline, EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// How often (in settled nodes) the deadline is polled.
const DEADLINE_POLL_INTERVAL: usize = 1_024;

// ── PathDistance ──────────────────────────────────────────────────────────────

/// Outcome of a search for one destination.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathDistance {
    /// Shortest-path length in metres.
    Finite(f64),
    /// No path exists in the searched direction.
    Unreachable,
}

impl PathDistance {
    pub fn metres(self) -> Option<f64> {
        match self {
            PathDistance::Finite(m) => Some(m),
            PathDistance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, PathDistance::Finite(_))
    }
}

// ── SearchDirection ───────────────────────────────────────────────────────────

/// Which way edges are traversed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchDirection {
    /// Distances *from* the source to each node (follow edges forwards).
    #[default]
    Outbound,
    /// Distances from each node *to* the source (follow edges backwards).
    Inbound,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Single-source Dijkstra with early exit once every target is settled.
///
/// The engine borrows the network immutably and keeps all search state in
/// the returned [`ShortestPathTree`], so one engine per candidate can run
/// on its own thread.
///
/// ```
/// use sc_core::GeoPoint;
/// use sc_spatial::{PathDistance, RoadNetworkBuilder, ShortestPathEngine};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(1, GeoPoint::new(0.0, 0.0)).unwrap();
/// let c = b.add_node(2, GeoPoint::new(0.0, 0.01)).unwrap();
/// b.add_road(a, c, 750.0).unwrap();
/// let net = b.build();
///
/// let tree = ShortestPathEngine::new(&net).run(a, &[c]).unwrap();
/// assert_eq!(tree.distance(c), PathDistance::Finite(750.0));
/// ```
pub struct ShortestPathEngine<'a> {
    network:      &'a RoadNetwork,
    direction:    SearchDirection,
    deadline:     Deadline,
    predecessors: bool,
}

impl<'a> ShortestPathEngine<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self {
            network,
            direction:    SearchDirection::Outbound,
            deadline:     Deadline::none(),
            predecessors: false,
        }
    }

    pub fn direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Keep predecessor links so [`ShortestPathTree::path`] can rebuild
    /// node sequences.  Off by default; it costs one `EdgeId` per node.
    pub fn with_predecessors(mut self, keep: bool) -> Self {
        self.predecessors = keep;
        self
    }

    /// Search from `source` until every node in `targets` is settled or the
    /// frontier is exhausted.  An empty `targets` settles everything
    /// reachable.
    ///
    /// Unreachable targets are not an error; only an unknown node or an
    /// expired deadline is.
    pub fn run(&self, source: NodeId, targets: &[NodeId]) -> SpatialResult<ShortestPathTree> {
        let net = self.network;
        let n = net.node_count();
        for &node in std::iter::once(&source).chain(targets) {
            if !net.contains(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
        }

        let mut dist      = vec![f64::INFINITY; n];
        let mut settled   = vec![false; n];
        let mut prev_edge = if self.predecessors { vec![EdgeId::INVALID; n] } else { Vec::new() };

        let mut is_target = vec![false; n];
        let mut remaining = 0usize;
        for &t in targets {
            if !is_target[t.index()] {
                is_target[t.index()] = true;
                remaining += 1;
            }
        }
        let exhaustive = targets.is_empty();

        dist[source.index()] = 0.0;

        // Min-heap: Reverse makes BinaryHeap (max) behave as a min-heap.
        // Secondary key NodeId ensures deterministic tie-breaking.
        let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((Cost(0.0), source)));

        let mut settled_count = 0usize;
        while let Some(Reverse((Cost(cost), node))) = heap.pop() {
            // Skip stale heap entries.
            if settled[node.index()] {
                continue;
            }
            settled[node.index()] = true;
            settled_count += 1;

            if is_target[node.index()] {
                remaining -= 1;
                if remaining == 0 && !exhaustive {
                    break;
                }
            }

            if settled_count % DEADLINE_POLL_INTERVAL == 0 && self.deadline.expired() {
                return Err(SpatialError::DeadlineExceeded { origin: source, settled: settled_count });
            }

            match self.direction {
                SearchDirection::Outbound => {
                    for edge in net.out_edges(node) {
                        let next = net.edge_to[edge.index()];
                        relax(net, &mut dist, &settled, &mut prev_edge, &mut heap, cost, edge, next);
                    }
                }
                SearchDirection::Inbound => {
                    for edge in net.in_edges(node) {
                        let next = net.edge_from[edge.index()];
                        relax(net, &mut dist, &settled, &mut prev_edge, &mut heap, cost, edge, next);
                    }
                }
            }
        }

        debug!(
            %source,
            direction = ?self.direction,
            settled = settled_count,
            targets = targets.len(),
            targets_missed = remaining,
            "shortest-path search finished"
        );

        Ok(ShortestPathTree {
            source,
            direction: self.direction,
            dist,
            settled,
            prev_edge,
        })
    }
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn relax(
    net: &RoadNetwork,
    dist: &mut [f64],
    settled: &[bool],
    prev_edge: &mut [EdgeId],
    heap: &mut BinaryHeap<Reverse<(Cost, NodeId)>>,
    cost: f64,
    edge: EdgeId,
    next: NodeId,
) {
    if settled[next.index()] {
        return;
    }
    let new_cost = cost + net.edge_length_m[edge.index()];
    if new_cost < dist[next.index()] {
        dist[next.index()] = new_cost;
        if let Some(slot) = prev_edge.get_mut(next.index()) {
            *slot = edge;
        }
        heap.push(Reverse((Cost(new_cost), next)));
    }
}

/// Totally ordered edge-length sum.  Lengths are validated finite and
/// non-negative at build time, so `total_cmp` agrees with `<`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Result of one [`ShortestPathEngine::run`].
///
/// Distances are final for every settled node.  When the search stopped
/// early because all targets were found, nodes that were never requested
/// may also read as unreachable; only query the targets you asked for (or
/// run with no targets).
pub struct ShortestPathTree {
    source:    NodeId,
    direction: SearchDirection,
    dist:      Vec<f64>,
    settled:   Vec<bool>,
    prev_edge: Vec<EdgeId>,
}

impl ShortestPathTree {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn distance(&self, node: NodeId) -> PathDistance {
        match self.settled.get(node.index()) {
            Some(true) => PathDistance::Finite(self.dist[node.index()]),
            _ => PathDistance::Unreachable,
        }
    }

    /// Distances for `nodes`, in the order given.
    pub fn distances(&self, nodes: &[NodeId]) -> Vec<PathDistance> {
        nodes.iter().map(|&n| self.distance(n)).collect()
    }

    /// Number of nodes whose distance is final.
    pub fn settled_count(&self) -> usize {
        self.settled.iter().filter(|&&s| s).count()
    }

    pub fn has_predecessors(&self) -> bool {
        !self.prev_edge.is_empty()
    }

    /// Node sequence of the shortest path between the source and `node`,
    /// ordered in travel direction: `source → node` for an outbound search,
    /// `node → source` for an inbound one.
    ///
    /// `None` if `node` was not reached, predecessors were not kept, or
    /// `network` is not the graph the tree was built on.
    pub fn path(&self, network: &RoadNetwork, node: NodeId) -> Option<Vec<NodeId>> {
        if !self.has_predecessors() || !self.distance(node).is_reachable() {
            return None;
        }

        let mut nodes = vec![node];
        let mut cur = node;
        while cur != self.source {
            let e = *self.prev_edge.get(cur.index())?;
            if !e.is_valid() {
                return None;
            }
            cur = match self.direction {
                SearchDirection::Outbound => *network.edge_from.get(e.index())?,
                SearchDirection::Inbound => *network.edge_to.get(e.index())?,
            };
            // A foreign network can link nodes into a cycle.
            if nodes.len() > self.prev_edge.len() {
                return None;
            }
            nodes.push(cur);
        }
        if self.direction == SearchDirection::Outbound {
            nodes.reverse();
        }
        Some(nodes)
    }
}

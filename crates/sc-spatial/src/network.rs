//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format in both directions.
//! Given a `NodeId n`, its outgoing edges are the EdgeIds
//!
//! ```text
//! node_out_start[n] .. node_out_start[n+1]
//! ```
//!
//! and its incoming edges are listed in
//!
//! ```text
//! in_edges[ node_in_start[n] .. node_in_start[n+1] ]
//! ```
//!
//! Edge arrays (`edge_from`, `edge_to`, `edge_length_m`) are sorted by
//! source node, then target node, and indexed by `EdgeId`.  Parallel edges
//! are kept; Dijkstra only ever uses the cheapest of them.  The incoming
//! index lets a single search compute distances from many samples *to* one
//! candidate.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to road nodes.  It snaps
//! origins, candidates, and unit centroids to the graph and enumerates the
//! nodes inside a unit's bounding box during polygon sampling.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as IdMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as IdMap;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use sc_core::{CoreError, EdgeId, GeoPoint, NodeId};

use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-node queries within a region (error < 0.1 % at ≤ 60° lat).
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Immutable once built: every query takes `&self`, so one network can be
/// shared (e.g. behind an `Arc`) by any number of concurrent searches.
/// Do not construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Identifier the node carried in the source data (e.g. an OSM id).
    pub node_external_id: Vec<u64>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// Outgoing edges of node `n` are EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Incoming edges of node `n` are `in_edges[node_in_start[n] .. node_in_start[n+1]]`.
    pub node_in_start: Vec<u32>,

    /// EdgeIds grouped by destination node.
    pub in_edges: Vec<EdgeId>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.  Always finite and `>= 0`.
    pub edge_length_m: Vec<f64>,

    // ── Lookup tables ─────────────────────────────────────────────────────
    external_index: IdMap<u64, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    pub fn position(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    /// Map an identifier from the source data back to its `NodeId`.
    pub fn lookup_external(&self, external_id: u64) -> Option<NodeId> {
        self.external_index.get(&external_id).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range; no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Iterator over the `EdgeId`s of all edges arriving at `node`.
    #[inline]
    pub fn in_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_in_start[node.index()] as usize;
        let end   = self.node_in_start[node.index() + 1] as usize;
        self.in_edges[start..end].iter().copied()
    }

    /// `(neighbor, length_m)` pairs reachable from `node` in one hop.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_edges(node)
            .map(|e| (self.edge_to[e.index()], self.edge_length_m[e.index()]))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        let start = self.node_in_start[node.index()] as usize;
        let end   = self.node_in_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Nodes at exactly the same distance resolve to the smallest `NodeId`,
    /// so repeated calls are reproducible regardless of R-tree layout.
    /// Returns `None` only if the network has no nodes.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        let mut iter = self
            .spatial_idx
            .nearest_neighbor_iter_with_distance_2(&[pos.lat, pos.lon]);
        let (first, best_d2) = iter.next()?;
        let mut best = first.id;
        for (entry, d2) in iter {
            if d2 > best_d2 {
                break;
            }
            best = best.min(entry.id);
        }
        Some(best)
    }

    /// Like [`nearest_node`](Self::nearest_node) but errors on an empty
    /// network, for callers that cannot proceed without a node.
    pub fn snap(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        self.nearest_node(pos).ok_or(SpatialError::EmptyNetwork)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|e| e.id)
            .collect()
    }

    /// All nodes inside the lat/lon box spanned by `a` and `b` (inclusive),
    /// sorted by `NodeId`.
    pub fn nodes_in_bbox(&self, a: GeoPoint, b: GeoPoint) -> Vec<NodeId> {
        let envelope = AABB::from_corners([a.lat, a.lon], [b.lat, b.lon]);
        let mut ids: Vec<NodeId> = self
            .spatial_idx
            .locate_in_envelope(&envelope)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// sorts edges, constructs both CSR indexes, and bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use sc_core::GeoPoint;
/// use sc_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(101, GeoPoint::new(52.20, 0.12)).unwrap();
/// let c = b.add_node(102, GeoPoint::new(52.21, 0.13)).unwrap();
/// b.add_road(a, c, 1_200.0).unwrap();
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:        Vec<GeoPoint>,
    external_ids: Vec<u64>,
    seen:         IdMap<u64, NodeId>,
    raw_edges:    Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:        Vec::new(),
            external_ids: Vec::new(),
            seen:         IdMap::default(),
            raw_edges:    Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:        Vec::with_capacity(nodes),
            external_ids: Vec::with_capacity(nodes),
            seen:         IdMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges:    Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    ///
    /// `external_id` must be unique within the network.
    pub fn add_node(&mut self, external_id: u64, pos: GeoPoint) -> SpatialResult<NodeId> {
        if !pos.is_valid() {
            return Err(CoreError::InvalidInput(format!(
                "node {external_id} has invalid position {pos}"
            ))
            .into());
        }
        if self.seen.contains_key(&external_id) {
            return Err(SpatialError::DuplicateNode(external_id));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.external_ids.push(external_id);
        self.seen.insert(external_id, id);
        Ok(id)
    }

    /// Add a **directed** edge from `from` to `to` of `length_m` metres.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) -> SpatialResult<()> {
        for n in [from, to] {
            if n.index() >= self.nodes.len() {
                return Err(SpatialError::NodeNotFound(n));
            }
        }
        if !length_m.is_finite() || length_m < 0.0 {
            return Err(SpatialError::InvalidEdgeLength { from, to, length_m });
        }
        self.raw_edges.push(RawEdge { from, to, length_m });
        Ok(())
    }

    /// Convenience: add edges in **both directions** for an undirected road
    /// segment.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64) -> SpatialResult<()> {
        self.add_directed_edge(a, b, length_m)?;
        self.add_directed_edge(b, a, length_m)
    }

    /// Position of a node added earlier (loaders use it to derive edge
    /// lengths between adjacent way nodes).
    pub fn node_pos(&self, id: NodeId) -> Option<GeoPoint> {
        self.nodes.get(id.index()).copied()
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort: parallel edges keep insertion order, so EdgeIds are
        // reproducible for identical input.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| (e.from.0, e.to.0));

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();

        let node_out_start = prefix_counts(node_count, edge_from.iter());
        let node_in_start  = prefix_counts(node_count, edge_to.iter());
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        // Scatter edges into the incoming index; iterating in EdgeId order
        // leaves each node's incoming list sorted by EdgeId.
        let mut cursor: Vec<u32> = node_in_start[..node_count].to_vec();
        let mut in_edges = vec![EdgeId::INVALID; edge_count];
        for (i, to) in edge_to.iter().enumerate() {
            let slot = &mut cursor[to.index()];
            in_edges[*slot as usize] = EdgeId(i as u32);
            *slot += 1;
        }

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_external_id: self.external_ids,
            node_out_start,
            node_in_start,
            in_edges,
            edge_from,
            edge_to,
            edge_length_m,
            external_index: self.seen,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// CSR row pointer from a list of per-edge endpoint nodes.
fn prefix_counts<'a>(node_count: usize, ends: impl Iterator<Item = &'a NodeId>) -> Vec<u32> {
    let mut start = vec![0u32; node_count + 1];
    for n in ends {
        start[n.index() + 1] += 1;
    }
    for i in 1..=node_count {
        start[i] += start[i - 1];
    }
    start
}

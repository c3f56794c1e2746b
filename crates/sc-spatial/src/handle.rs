//! Caller-owned cache for a built road network.
//!
//! Building a network from map data is expensive (seconds to minutes for a
//! county), while the network itself never changes once built.  The
//! dashboard therefore keeps one [`RoadNetworkHandle`] per session and asks
//! it for the network of the region being scored; the handle rebuilds only
//! when the region changes or the caller invalidates it.

use std::sync::Arc;

use tracing::{debug, info};

use sc_core::CoreError;

use crate::{RoadNetwork, SpatialResult};

/// Produces a road network for a named region (OSM extract, test fixture…).
///
/// Any `Fn(&str) -> SpatialResult<RoadNetwork>` closure is a source.
pub trait NetworkSource {
    fn build(&self, region: &str) -> SpatialResult<RoadNetwork>;
}

impl<F> NetworkSource for F
where
    F: Fn(&str) -> SpatialResult<RoadNetwork>,
{
    fn build(&self, region: &str) -> SpatialResult<RoadNetwork> {
        self(region)
    }
}

/// Build / reuse / invalidate lifecycle for one cached network.
///
/// The network is handed out as `Arc<RoadNetwork>`: concurrent queries
/// share it read-only, and invalidating the handle never pulls the graph
/// out from under a query that is still running.
#[derive(Default)]
pub struct RoadNetworkHandle {
    cached: Option<(String, Arc<RoadNetwork>)>,
    builds: usize,
}

impl RoadNetworkHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the network for `region`, building it with `source` unless
    /// the cached one already belongs to that region.
    pub fn get_or_build(
        &mut self,
        region: &str,
        source: &dyn NetworkSource,
    ) -> SpatialResult<Arc<RoadNetwork>> {
        let region = region.trim();
        if region.is_empty() {
            return Err(CoreError::InvalidInput("no region given".into()).into());
        }

        if let Some((cached_region, net)) = &self.cached {
            if cached_region == region {
                debug!(region, "reusing cached road network");
                return Ok(Arc::clone(net));
            }
        }

        let net = Arc::new(source.build(region)?);
        self.builds += 1;
        info!(
            region,
            nodes = net.node_count(),
            edges = net.edge_count(),
            "built road network"
        );
        self.cached = Some((region.to_owned(), Arc::clone(&net)));
        Ok(net)
    }

    /// The cached network, if any.
    pub fn current(&self) -> Option<Arc<RoadNetwork>> {
        self.cached.as_ref().map(|(_, net)| Arc::clone(net))
    }

    pub fn region(&self) -> Option<&str> {
        self.cached.as_ref().map(|(r, _)| r.as_str())
    }

    /// Drop the cached network; the next `get_or_build` rebuilds.
    pub fn invalidate(&mut self) {
        if let Some((region, _)) = self.cached.take() {
            debug!(region, "invalidated cached road network");
        }
    }

    /// How many times a network has been built through this handle.
    pub fn build_count(&self) -> usize {
        self.builds
    }
}

//! Demand selection around an origin or candidate site.

use geo::Contains;
use tracing::{debug, warn};

use sc_core::error::require_positive;
use sc_core::{CoreError, Diagnostic, GeoPoint, NodeId};
use sc_spatial::RoadNetwork;

use crate::geometry::{bbox_corners, ring_polygon, to_point};
use crate::{CandidateSamples, DemandResult, DemandSample, DemandUnit, ResolvedUnit};

/// Read-only view over a network and the demand units of its region.
///
/// Cheap to construct; holds only borrows, so one index can serve
/// concurrent queries.
pub struct DemandIndex<'a> {
    network: &'a RoadNetwork,
    units:   &'a [DemandUnit],
}

impl<'a> DemandIndex<'a> {
    pub fn new(network: &'a RoadNetwork, units: &'a [DemandUnit]) -> Self {
        Self { network, units }
    }

    pub fn units(&self) -> &'a [DemandUnit] {
        self.units
    }

    // ── Radius mode ───────────────────────────────────────────────────────

    /// Units whose boundary lies strictly within `radius_m` of `origin`
    /// (planar, equidistant projection), in input order, each snapped to
    /// the node nearest its centroid.
    ///
    /// `ResolvedUnit::in_radius` additionally marks units whose centroid is
    /// within `radius_m` great-circle distance (inclusive).
    pub fn units_within(&self, origin: GeoPoint, radius_m: f64) -> DemandResult<Vec<ResolvedUnit>> {
        let radius_m = require_positive("radius", radius_m)?;
        require_valid("origin", origin)?;

        let mut selected = Vec::new();
        for unit in self.units {
            if unit.geometry.planar_distance_m(origin) >= radius_m {
                continue;
            }
            let centroid = unit.centroid();
            let node = self.network.snap(centroid)?;
            let geodesic_m = origin.distance_m(centroid);
            selected.push(ResolvedUnit {
                code: unit.code.clone(),
                population: unit.population,
                centroid,
                node,
                geodesic_m,
                in_radius: geodesic_m <= radius_m,
            });
        }

        debug!(
            %origin,
            radius_m,
            selected = selected.len(),
            in_radius = selected.iter().filter(|u| u.in_radius).count(),
            "radius selection"
        );
        Ok(selected)
    }

    // ── Polygon-sampling mode ─────────────────────────────────────────────

    /// Sample demand around a candidate.
    ///
    /// A unit is selected when its boundary intersects the geodesic circle
    /// of `radius_m` around `candidate`, or contains `candidate`.  Every
    /// road node strictly inside the unit's largest polygon becomes a
    /// [`DemandSample`], except `candidate_node` itself.
    pub fn sample_candidate(
        &self,
        candidate: GeoPoint,
        candidate_node: NodeId,
        radius_m: f64,
        circle_vertices: usize,
    ) -> DemandResult<CandidateSamples> {
        let radius_m = require_positive("radius", radius_m)?;
        require_valid("candidate", candidate)?;

        let circle = ring_polygon(&candidate.geodesic_circle(radius_m, circle_vertices));

        let mut out = CandidateSamples { candidate_node, ..CandidateSamples::default() };
        for unit in self.units {
            let selected = unit.geometry.contains_point(candidate)
                || unit.geometry.intersects_polygon(&circle);
            if !selected {
                continue;
            }
            out.units.push(unit.code.clone());

            if !unit.population.is_known() {
                warn!(unit = %unit.code, "unit has no population; its samples carry no weight");
                out.diagnostics.push(Diagnostic::UnknownPopulation { unit: unit.code.clone() });
            }

            let Some(poly) = unit.geometry.largest_polygon() else { continue };
            let Some((sw, ne)) = bbox_corners(&poly) else { continue };

            for node in self.network.nodes_in_bbox(sw, ne) {
                if node == candidate_node {
                    continue;
                }
                let Some(pos) = self.network.position(node) else { continue };
                if poly.contains(&to_point(pos)) {
                    out.samples.push(DemandSample {
                        unit_code:  unit.code.clone(),
                        node,
                        population: unit.population,
                    });
                }
            }
        }

        debug!(
            %candidate,
            radius_m,
            units = out.units.len(),
            samples = out.samples.len(),
            "candidate sampling"
        );
        Ok(out)
    }
}

fn require_valid(what: &str, p: GeoPoint) -> DemandResult<()> {
    if p.is_valid() {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!("{what} {p} is not a valid coordinate")).into())
    }
}

//! Synthetic road network for the demo region.
//!
//! An 8 × 8 street grid over central Cambridge (≈ 110 m × 140 m blocks).
//! Every street is two-way except the top row, which is one-way eastbound.

use sc_core::{GeoPoint, NodeId};
use sc_spatial::{RoadNetwork, RoadNetworkBuilder, SpatialError, SpatialResult};

pub const REGION: &str = "Cambridge";

pub const ROWS: usize = 8;
pub const COLS: usize = 8;

const LAT0: f64 = 52.196;
const LON0: f64 = 0.110;
const LAT_STEP: f64 = 0.001;
const LON_STEP: f64 = 0.002;

pub fn grid_pos(row: usize, col: usize) -> GeoPoint {
    GeoPoint::new(LAT0 + row as f64 * LAT_STEP, LON0 + col as f64 * LON_STEP)
}

/// South-west and north-east corners of the grid.
pub fn extent() -> (GeoPoint, GeoPoint) {
    (grid_pos(0, 0), grid_pos(ROWS - 1, COLS - 1))
}

/// `NetworkSource` for the demo: only [`REGION`] is known.
pub fn build_network(region: &str) -> SpatialResult<RoadNetwork> {
    if !region.eq_ignore_ascii_case(REGION) {
        return Err(SpatialError::Build {
            region: region.to_owned(),
            reason: "no road data for region".into(),
        });
    }

    let mut b = RoadNetworkBuilder::with_capacity(ROWS * COLS, 4 * ROWS * COLS);
    let mut ids = [[NodeId::INVALID; COLS]; ROWS];
    for (r, row) in ids.iter_mut().enumerate() {
        for (c, id) in row.iter_mut().enumerate() {
            *id = b.add_node(10_000 + (r * COLS + c) as u64, grid_pos(r, c))?;
        }
    }

    for r in 0..ROWS {
        for c in 0..COLS {
            if c + 1 < COLS {
                let len = grid_pos(r, c).distance_m(grid_pos(r, c + 1));
                if r == ROWS - 1 {
                    b.add_directed_edge(ids[r][c], ids[r][c + 1], len)?;
                } else {
                    b.add_road(ids[r][c], ids[r][c + 1], len)?;
                }
            }
            if r + 1 < ROWS {
                let len = grid_pos(r, c).distance_m(grid_pos(r + 1, c));
                b.add_road(ids[r][c], ids[r + 1][c], len)?;
            }
        }
    }
    Ok(b.build())
}

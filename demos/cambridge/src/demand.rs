//! Demo areal units and their census populations.
//!
//! The grid is split into four quadrant units plus a strip along the north
//! edge whose population is missing from the census table.

use std::io::Cursor;

use sc_core::GeoPoint;
use sc_demand::{
    DemandResult, DemandUnit, Geometry, InMemoryDemandSource, Population, load_population_reader,
};

use crate::network::{REGION, extent};

const CENSUS_CSV: &str = "\
LSOA21CD,Population\n\
E01017001,1520\n\
E01017002,1875\n\
E01017003,1310\n\
E01017004,2040\n\
E01017005,\n\
";

fn rect(sw: GeoPoint, ne: GeoPoint) -> Geometry {
    Geometry::from_ring(&[
        GeoPoint::new(sw.lat, sw.lon),
        GeoPoint::new(sw.lat, ne.lon),
        GeoPoint::new(ne.lat, ne.lon),
        GeoPoint::new(ne.lat, sw.lon),
        GeoPoint::new(sw.lat, sw.lon),
    ])
}

/// Unit boundaries with populations joined from the census table.
pub fn demand_source() -> DemandResult<InMemoryDemandSource> {
    let (sw, ne) = extent();
    // Pad so no grid node sits exactly on a boundary.
    let pad = 0.0004;
    let (s, w, n, e) = (sw.lat - pad, sw.lon - pad, ne.lat + pad, ne.lon + pad);
    let strip = ne.lat - 0.0015;
    let mid_lat = (s + strip) / 2.0 + 0.0001;
    let mid_lon = (w + e) / 2.0 + 0.0001;

    let pt = GeoPoint::new;
    let boundaries = [
        ("E01017001", rect(pt(s, w), pt(mid_lat, mid_lon))),
        ("E01017002", rect(pt(s, mid_lon), pt(mid_lat, e))),
        ("E01017003", rect(pt(mid_lat, w), pt(strip, mid_lon))),
        ("E01017004", rect(pt(mid_lat, mid_lon), pt(strip, e))),
        ("E01017005", rect(pt(strip, w), pt(n, e))),
    ];

    let units = boundaries
        .into_iter()
        .map(|(code, geom)| DemandUnit::new(code, Population::Unknown, geom))
        .collect::<DemandResult<Vec<_>>>()?;

    let census = load_population_reader(Cursor::new(CENSUS_CSV))?;
    Ok(InMemoryDemandSource::new().with_region(REGION, census.apply(units)))
}

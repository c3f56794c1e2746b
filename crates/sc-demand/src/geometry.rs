//! Boundary geometry of an areal unit.
//!
//! Coordinates follow the `geo` convention: `x` is longitude, `y` latitude.
//! Containment and intersection tests are done in raw lon/lat space, which
//! is accurate enough at unit scale (a few hundred metres across).
//! Units straddling the antimeridian are not supported: a search circle
//! near ±180° is continuous in longitude and may pass beyond the range,
//! so it only matches units drawn on its own side.

use geo::{
    Area, BoundingRect, Centroid, Contains, Coord, EuclideanDistance, Intersects, LineString,
    MapCoords, MultiPolygon, Point, Polygon,
};

use sc_core::GeoPoint;

#[inline]
pub fn to_point(p: GeoPoint) -> Point<f64> {
    Point::new(p.lon, p.lat)
}

#[inline]
pub fn to_geo_point(p: Point<f64>) -> GeoPoint {
    GeoPoint::new(p.y(), p.x())
}

/// A closed ring of `GeoPoint`s as a hole-free polygon.
pub fn ring_polygon(ring: &[GeoPoint]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.lon, y: p.lat }).collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Unit boundary: a single polygon or several disjoint ones.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Geometry {
    /// Convenience constructor from one lat/lon ring.
    pub fn from_ring(ring: &[GeoPoint]) -> Self {
        Geometry::Polygon(ring_polygon(ring))
    }

    /// Convenience constructor from several lat/lon rings, one polygon each.
    pub fn from_rings(rings: &[Vec<GeoPoint>]) -> Self {
        Geometry::MultiPolygon(MultiPolygon::new(
            rings.iter().map(|r| ring_polygon(r)).collect(),
        ))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Polygon(p) => p.exterior().0.is_empty(),
            Geometry::MultiPolygon(mp) => mp.0.iter().all(|p| p.exterior().0.is_empty()),
        }
    }

    /// The member polygon with the largest area, holes removed.
    ///
    /// Node sampling only tests containment against this polygon; small
    /// islands and holes of a multi-part unit are ignored.  Ties keep the
    /// first polygon in input order.
    pub fn largest_polygon(&self) -> Option<Polygon<f64>> {
        let largest = match self {
            Geometry::Polygon(p) => p,
            Geometry::MultiPolygon(mp) => {
                let mut best: Option<&Polygon<f64>> = None;
                for p in &mp.0 {
                    if best.is_none_or(|b| p.unsigned_area() > b.unsigned_area()) {
                        best = Some(p);
                    }
                }
                best?
            }
        };
        if largest.exterior().0.is_empty() {
            return None;
        }
        Some(Polygon::new(largest.exterior().clone(), vec![]))
    }

    /// Area-weighted centroid of the whole geometry.
    pub fn centroid(&self) -> Option<GeoPoint> {
        let c = match self {
            Geometry::Polygon(p) => p.centroid(),
            Geometry::MultiPolygon(mp) => mp.centroid(),
        };
        c.map(to_geo_point)
    }

    pub fn contains_point(&self, p: GeoPoint) -> bool {
        let pt = to_point(p);
        match self {
            Geometry::Polygon(poly) => poly.contains(&pt),
            Geometry::MultiPolygon(mp) => mp.contains(&pt),
        }
    }

    pub fn intersects_polygon(&self, other: &Polygon<f64>) -> bool {
        match self {
            Geometry::Polygon(poly) => poly.intersects(other),
            Geometry::MultiPolygon(mp) => mp.intersects(other),
        }
    }

    /// Planar distance in metres from `origin` to the nearest point of the
    /// boundary (0 when `origin` lies inside), measured in an azimuthal
    /// equidistant projection centred on `origin`.
    pub fn planar_distance_m(&self, origin: GeoPoint) -> f64 {
        let project = |c: Coord<f64>| {
            let (x, y) = GeoPoint::new(c.y, c.x).project_equidistant(origin);
            Coord { x, y }
        };
        let centre = Point::new(0.0, 0.0);
        match self {
            Geometry::Polygon(p) => centre.euclidean_distance(&p.map_coords(project)),
            Geometry::MultiPolygon(mp) => centre.euclidean_distance(&mp.map_coords(project)),
        }
    }
}

/// Lat/lon corners (south-west, north-east) of a polygon's bounding box.
pub fn bbox_corners(poly: &Polygon<f64>) -> Option<(GeoPoint, GeoPoint)> {
    let rect = poly.bounding_rect()?;
    Some((
        GeoPoint::new(rect.min().y, rect.min().x),
        GeoPoint::new(rect.max().y, rect.max().x),
    ))
}

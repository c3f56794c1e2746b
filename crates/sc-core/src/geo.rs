//! Geographic coordinate type and spherical-earth utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Scores must be bit-identical
//! across runs and platforms, and distances are summed over thousands of
//! samples, so single precision is not enough here.

/// Mean Earth radius in metres (spherical model, as used by haversine).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite and inside the WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// The point reached by travelling `distance_m` along the great circle
    /// leaving `self` at `bearing_deg` (clockwise from north).
    pub fn destination(self, bearing_deg: f64, distance_m: f64) -> GeoPoint {
        let delta = distance_m / EARTH_RADIUS_M;
        let theta = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        // Normalise longitude back into [-180, 180).
        let lon2 = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        GeoPoint::new(lat2.to_degrees(), lon2)
    }

    /// Closed ring approximating the geodesic circle of `radius_m` around
    /// `self`, with `vertices` distinct points (the first is repeated at the
    /// end).  Bearings start at north and proceed clockwise.
    ///
    /// Longitudes are kept continuous around `self.lon`, so a circle that
    /// crosses the antimeridian extends past ±180° instead of wrapping.
    pub fn geodesic_circle(self, radius_m: f64, vertices: usize) -> Vec<GeoPoint> {
        let n = vertices.max(3);
        let mut ring: Vec<GeoPoint> = (0..n)
            .map(|i| {
                let p = self.destination(360.0 * i as f64 / n as f64, radius_m);
                let d_lon = (p.lon - self.lon + 540.0).rem_euclid(360.0) - 180.0;
                GeoPoint::new(p.lat, self.lon + d_lon)
            })
            .collect();
        ring.push(ring[0]);
        ring
    }

    /// Azimuthal equidistant projection centred on `origin`, in metres.
    ///
    /// Returns `(x, y)` with `x` east and `y` north.  Planar distance from
    /// `(0, 0)` equals great-circle distance from `origin`, which is the
    /// property radius filtering needs.
    pub fn project_equidistant(self, origin: GeoPoint) -> (f64, f64) {
        let c = origin.distance_m(self) / EARTH_RADIUS_M;
        if c == 0.0 {
            return (0.0, 0.0);
        }
        let k = c / c.sin();

        let lat0 = origin.lat.to_radians();
        let lat = self.lat.to_radians();
        let d_lon = (self.lon - origin.lon).to_radians();

        let x = EARTH_RADIUS_M * k * lat.cos() * d_lon.sin();
        let y = EARTH_RADIUS_M
            * k
            * (lat0.cos() * lat.sin() - lat0.sin() * lat.cos() * d_lon.cos());
        (x, y)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

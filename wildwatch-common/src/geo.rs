//! Great-circle distance on a spherical Earth

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Parse a pair of text coordinates; `None` if either is not a finite number
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        Some(Self::new(parse_degrees(latitude)?, parse_degrees(longitude)?))
    }

    /// Haversine distance to `other` in kilometres
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Parse a decimal-degree value, tolerating surrounding whitespace
///
/// Rejects anything that does not yield a finite `f64` (`"NaN"`, `"inf"`).
pub fn parse_degrees(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Haversine great-circle distance between two points in kilometres
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// d = 2·R·atan2(√a, √(1−a))
/// ```
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    // sin² is even, so taking |Δ| makes the result identical under argument swap
    let dlat = (lat2 - lat1).abs();
    let dlon = (to.longitude.to_radians() - from.longitude.to_radians()).abs();

    // Rounding can push `a` just past 1 near the antipode; √(1−a) must stay real
    let a = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

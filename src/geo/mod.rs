use serde::{Serialize, Deserialize};

pub const EARTH_RADIUS: f64 = 6378137.0;

/// Altitude all aircraft are assumed to cruise at, in meters AMSL (40 000 ft).
pub const CRUISE_ALTITUDE: f64 = 12192.0;

/// Maximum air-to-air communications range, in meters.
pub const COMMS_RADIUS_M: f64 = 386_243.0;

/// Maximum slant range from a ground point to an overhead node, in meters.
/// Also used as the acceptance radius for nearest-node queries.
pub const GROUND_COMMS_RADIUS_M: f64 = 386_049.0;

pub const US_CENTER_LAT: f64 = 39.833333;
pub const US_CENTER_LON: f64 = -98.583333;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Great-circle angular separation between two points, in radians (haversine).
pub fn central_angle(p1: LatLon, p2: LatLon) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two points on a sphere of `planet_radius`,
/// flown at a constant `altitude` above it, in meters.
pub fn distance(p1: LatLon, p2: LatLon, planet_radius: f64, altitude: f64) -> f64 {
    central_angle(p1, p2) * (planet_radius + altitude)
}

/// Distance at the shared cruise altitude over Earth, in meters.
pub fn air_distance(p1: LatLon, p2: LatLon) -> f64 {
    distance(p1, p2, EARTH_RADIUS, CRUISE_ALTITUDE)
}

/// Point at `fraction` (0..1) along the great-circle arc from `p1` to `p2`.
/// Coincident endpoints short-circuit to `p1`; near-antipodal endpoints,
/// where the arc is ambiguous and `sin(delta)` vanishes, blend linearly.
pub fn interpolate_great_circle(p1: LatLon, p2: LatLon, fraction: f64) -> LatLon {
    let delta = central_angle(p1, p2);
    if delta < 1e-12 {
        return p1;
    }
    if std::f64::consts::PI - delta < 1e-6 {
        return LatLon {
            latitude: p1.latitude + (p2.latitude - p1.latitude) * fraction,
            longitude: p1.longitude + (p2.longitude - p1.longitude) * fraction,
        };
    }

    let a = ((1.0 - fraction) * delta).sin() / delta.sin();
    let b = (fraction * delta).sin() / delta.sin();

    let lat1 = p1.latitude.to_radians();
    let lon1 = p1.longitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let lon2 = p2.longitude.to_radians();

    let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
    let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
    let z = a * lat1.sin() + b * lat2.sin();

    LatLon {
        latitude: z.atan2((x * x + y * y).sqrt()).to_degrees(),
        longitude: y.atan2(x).to_degrees(),
    }
}

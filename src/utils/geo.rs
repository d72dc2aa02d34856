/// Default geofence radius between a check-in fix and its checkout fix, in km.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 0.5;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Parse a "lat, lon" string (comma plus optional whitespace).
/// Malformed or non-finite input yields `None`, never an error.
pub fn parse_coordinate(text: &str) -> Option<(f64, f64)> {
    let (lat, lon) = text.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    Some((lat, lon))
}

/// Haversine great-circle distance in km, full precision.
pub fn distance_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = a;
    let (lat2, lon2) = b;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Distance rounded to 3 decimals for storage/display.
/// Threshold comparisons use the full-precision value.
pub fn rounded_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

pub fn is_within_radius(a: (f64, f64), b: (f64, f64), max_km: f64) -> bool {
    distance_km(a, b) <= max_km
}

/// Geofence check: true when the checkout fix drifted past `max_km` from the check-in fix.
pub fn is_out_of_area(a: (f64, f64), b: (f64, f64), max_km: f64) -> bool {
    !is_within_radius(a, b, max_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lon_with_optional_whitespace() {
        assert_eq!(parse_coordinate("13.7563,100.5018"), Some((13.7563, 100.5018)));
        assert_eq!(parse_coordinate(" 13.7563 , 100.5018 "), Some((13.7563, 100.5018)));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("13.7563"), None);
        assert_eq!(parse_coordinate("north, east"), None);
        assert_eq!(parse_coordinate("NaN, 100.5"), None);
        assert_eq!(parse_coordinate("inf, 100.5"), None);
    }

    #[test]
    fn distance_between_nearby_points() {
        let d = distance_km((13.7563, 100.5018), (13.7564, 100.5019));
        assert!(d > 0.01 && d < 0.03, "expected ~0.02 km, got {}", d);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = (13.7563, 100.5018);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn rounds_to_three_decimals() {
        assert_eq!(rounded_km(1.23456), 1.235);
        assert_eq!(rounded_km(0.0004), 0.0);
    }

    #[test]
    fn geofence_flags_drift_past_threshold() {
        let store = (13.7563, 100.5018);
        let nearby = (13.7564, 100.5019);
        // ~7 km away
        let far = (13.82, 100.52);
        assert!(is_within_radius(store, nearby, DEFAULT_MAX_DISTANCE_KM));
        assert!(!is_out_of_area(store, nearby, DEFAULT_MAX_DISTANCE_KM));
        assert!(is_out_of_area(store, far, DEFAULT_MAX_DISTANCE_KM));
    }
}

use crate::constants::EARTH_RADIUS_KM;
use crate::point::Point;

/// Great-circle distance between two points in kilometers, on a sphere
/// of radius 6371 km.
///
/// Coordinates outside the valid degree ranges are not rejected here;
/// the formula returns whatever the arithmetic produces. Range checks
/// live at the input boundary instead.
pub fn haversine_km(a: &Point, b: &Point) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::haversine_km;
    use crate::point::Point;

    fn point(name: &str, lat: f64, lon: f64) -> Point {
        Point::new(name, 0, lat, lon)
    }

    #[test]
    fn distance_is_symmetric() {
        let a = point("a", 37.7749, -122.4194);
        let b = point("b", 34.0522, -118.2437);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = point("a", 51.5074, -0.1278);
        assert_eq!(haversine_km(&a, &a), 0.0);
    }

    #[test]
    fn london_to_paris_matches_known_separation() {
        let london = point("London", 51.5074, -0.1278);
        let paris = point("Paris", 48.8566, 2.3522);
        let d = haversine_km(&london, &paris);
        assert!((d - 343.5).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_a_circumference_apart() {
        let a = point("a", 0.0, 0.0);
        let b = point("b", 0.0, 180.0);
        let d = haversine_km(&a, &b);
        assert!((d - 20_015.0).abs() < 1.0, "got {d}");
    }

    #[test]
    fn distance_is_never_negative() {
        let points = [
            point("a", 70.0833, 27.85),
            point("b", -33.8678, 151.21),
            point("c", 40.6943, -73.9249),
        ];
        for a in &points {
            for b in &points {
                assert!(haversine_km(a, b) >= 0.0);
            }
        }
    }
}

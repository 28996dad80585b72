use std::fmt;

const LAT_LIMIT: f64 = 90.0;
const LON_LIMIT: f64 = 180.0;

/// A named geographic stop.
/// `lat`/`lon` are degrees. `population` only decides which cities are
/// selected for the search; the metric itself never reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub name: String,
    pub population: u64,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, population: u64, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            population,
            lat,
            lon,
        }
    }

    /// The fixed route origin. It does not appear in city data files,
    /// so its coordinates are pinned here.
    pub fn korvatunturi() -> Self {
        Self::new("Korvatunturi", 10, 70.0833, 27.85)
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-LAT_LIMIT..=LAT_LIMIT).contains(&self.lat)
            && (-LON_LIMIT..=LON_LIMIT).contains(&self.lon)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(
            f,
            "{} ({},{})",
            self.name,
            b1.format(self.lat),
            b2.format(self.lon)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn korvatunturi_is_pinned_to_known_coordinates() {
        let origin = Point::korvatunturi();
        assert_eq!(origin.name, "Korvatunturi");
        assert_eq!(origin.population, 10);
        assert_eq!(origin.lat, 70.0833);
        assert_eq!(origin.lon, 27.85);
    }

    #[test]
    fn valid_bounds_are_accepted() {
        assert!(Point::new("a", 0, -90.0, -180.0).is_valid());
        assert!(Point::new("b", 0, 90.0, 180.0).is_valid());
        assert!(Point::new("c", 0, 0.0, 0.0).is_valid());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(!Point::new("a", 0, 91.0, 0.0).is_valid());
        assert!(!Point::new("b", 0, 0.0, 181.0).is_valid());
        assert!(!Point::new("c", 0, f64::NAN, 0.0).is_valid());
        assert!(!Point::new("d", 0, 0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn display_shows_name_and_coordinates() {
        let point = Point::new("Tokyo", 37_977_000, 35.6897, 139.6922);
        assert_eq!(point.to_string(), "Tokyo (35.6897,139.6922)");
    }
}

/// Mean Earth radius used by the haversine metric, in kilometers.
pub(crate) const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Hard ceiling on waypoint count. The search scores every one of the
/// n! orderings, so anything past this is rejected rather than left to
/// run for days.
pub(crate) const MAX_WAYPOINTS: usize = 12;

/// Waypoint counts above this still run, with a factorial-cost warning.
pub(crate) const WARN_WAYPOINTS: usize = 10;

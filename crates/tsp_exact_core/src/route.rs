use crate::cache::DistanceCache;
use crate::geo;
use crate::point::Point;

/// Sum of consecutive pairwise distances along `order`, in kilometers.
///
/// `order` indexes into the cache's point slice. Empty and single-stop
/// orders cost zero. The only side effect is cache population, which
/// never changes the returned value.
pub fn route_cost(cache: &mut DistanceCache<'_>, order: &[usize]) -> f64 {
    let mut total = 0.0;
    for pair in order.windows(2) {
        total += cache.get_or_compute(pair[0], pair[1]);
    }
    total
}

/// An ordered visit sequence starting at the fixed origin, with its
/// total length. There is no return leg to the origin.
#[derive(Clone, Debug)]
pub struct Route {
    pub stops: Vec<Point>,
    pub total_km: f64,
}

impl Route {
    pub(crate) fn new(stops: Vec<Point>, total_km: f64) -> Self {
        Self { stops, total_km }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Distance of each leg between consecutive stops, in kilometers.
    pub fn leg_distances(&self) -> Vec<f64> {
        self.stops
            .windows(2)
            .map(|pair| geo::haversine_km(&pair[0], &pair[1]))
            .collect()
    }

    pub fn log_metrics(&self) {
        let n = self.len();
        if n < 2 {
            log::info!("metrics: n={n} total_km=0 longest_km=0 avg_km=0");
            return;
        }

        let legs = self.leg_distances();
        let total: f64 = legs.iter().sum();
        let longest = legs.iter().copied().fold(0.0_f64, f64::max);
        let average = total / legs.len() as f64;

        log::info!(
            "metrics: n={n} total_km={total:.1} longest_km={longest:.1} avg_km={average:.1}"
        );
    }
}

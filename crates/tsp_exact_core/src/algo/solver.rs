use std::{collections::HashSet, thread};

use rayon::prelude::*;

use crate::{
    Error, Result,
    cache::DistanceCache,
    constants::{MAX_WAYPOINTS, WARN_WAYPOINTS},
    options::{SolverMode, SolverOptions},
    permutations::Permutations,
    point::Point,
    route::{self, Route},
};

const ERR_INVALID_POINT: &str = "Input contains invalid lat/lon values";
const ERR_NO_RESULTS: &str = "No results";

/// Find the shortest route that starts at `origin` and visits every
/// waypoint exactly once, by scoring all n! orderings.
///
/// The running minimum is established once, before enumeration begins,
/// and only tightens on strict improvement, so ties go to the earliest
/// ordering in lexicographic order. The parallel mode partitions the
/// orderings by first waypoint and reduces worker minima on
/// (cost, partition index), which keeps its result identical to the
/// single-threaded mode.
pub fn solve_exact(origin: Point, waypoints: Vec<Point>, options: &SolverOptions) -> Result<Route> {
    validate(&origin, &waypoints)?;

    let n = waypoints.len();
    if n > WARN_WAYPOINTS {
        log::warn!("solver: n={n} waypoints means {}! orderings, expect a long run", n);
    }
    log::info!(
        "solver: start n={n} mode={} orderings={}",
        options.solver_mode.as_str(),
        factorial(n)
    );

    let mut points = Vec::with_capacity(n + 1);
    points.push(origin);
    points.extend(waypoints);

    let (best_order, best_cost, evaluations) = match options.solver_mode {
        SolverMode::Single => search_sequential(&points),
        SolverMode::Parallel if n >= 2 => search_parallel(&points)?,
        SolverMode::Parallel => search_sequential(&points),
    };

    log::info!("solver: complete best_km={best_cost:.1} evaluations={evaluations}");

    let stops = best_order.iter().map(|&idx| points[idx].clone()).collect();
    Ok(Route::new(stops, best_cost))
}

fn validate(origin: &Point, waypoints: &[Point]) -> Result<()> {
    if waypoints.len() > MAX_WAYPOINTS {
        return Err(Error::invalid_input(format!(
            "{} waypoints exceeds the exhaustive-search limit of {MAX_WAYPOINTS}",
            waypoints.len()
        )));
    }
    if !origin.is_valid() || waypoints.iter().any(|p| !p.is_valid()) {
        return Err(Error::invalid_input(ERR_INVALID_POINT));
    }

    // Waypoint identity is the name; the search assumes distinct stops.
    let mut seen = HashSet::with_capacity(waypoints.len() + 1);
    seen.insert(origin.name.as_str());
    for point in waypoints {
        if !seen.insert(point.name.as_str()) {
            return Err(Error::DuplicateWaypoint(point.name.clone()));
        }
    }
    Ok(())
}

/// Scan every ordering with one shared cache. `points[0]` is the origin;
/// the permutations run over `points[1..]`.
fn search_sequential(points: &[Point]) -> (Vec<usize>, f64, usize) {
    let n = points.len() - 1;
    let mut cache = DistanceCache::new(points);
    let mut best_cost = f64::INFINITY;
    let mut best_order: Vec<usize> = Vec::new();

    let mut candidate = Vec::with_capacity(n + 1);
    for perm in Permutations::new(n) {
        candidate.clear();
        candidate.push(0);
        candidate.extend(perm.iter().map(|idx| idx + 1));

        let cost = route::route_cost(&mut cache, &candidate);
        if cost < best_cost {
            best_cost = cost;
            best_order = candidate.clone();
        }
    }

    (best_order, best_cost, cache.computed())
}

/// Partition the orderings by first waypoint and scan each block on the
/// pool, every worker with its own cache. Block-local enumeration is a
/// contiguous slice of the global lexicographic order, so reducing on
/// (cost, block index) reproduces the sequential tie-break.
fn search_parallel(points: &[Point]) -> Result<(Vec<usize>, f64, usize)> {
    let n = points.len() - 1;
    let parallelism = worker_threads().min(n);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
        .map_err(|e| Error::other(format!("rayon pool: {e}")))?;

    log::debug!("solver.parallel: start branches={n} threads={parallelism}");

    let branches: Vec<(Vec<usize>, f64, usize)> = pool.install(|| {
        (0..n)
            .into_par_iter()
            .map(|first| {
                let mut cache = DistanceCache::new(points);
                let mut best_cost = f64::INFINITY;
                let mut best_order: Vec<usize> = Vec::new();

                let rest: Vec<usize> = (1..=n).filter(|&idx| idx != first + 1).collect();
                let mut candidate = Vec::with_capacity(n + 1);
                for perm in Permutations::new(n - 1) {
                    candidate.clear();
                    candidate.push(0);
                    candidate.push(first + 1);
                    candidate.extend(perm.iter().map(|&idx| rest[idx]));

                    let cost = route::route_cost(&mut cache, &candidate);
                    if cost < best_cost {
                        best_cost = cost;
                        best_order = candidate.clone();
                    }
                }

                log::debug!("solver.branch: done first={first} best_km={best_cost:.1}");
                (best_order, best_cost, cache.computed())
            })
            .collect()
    });

    let evaluations = branches.iter().map(|branch| branch.2).sum();
    let (best_order, best_cost, _) = branches
        .into_iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| a.1.total_cmp(&b.1).then_with(|| ia.cmp(ib)))
        .map(|(_, branch)| branch)
        .ok_or_else(|| Error::other(ERR_NO_RESULTS))?;

    Ok((best_order, best_cost, evaluations))
}

fn worker_threads() -> usize {
    thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(2)
        .saturating_sub(1)
        .max(1)
}

fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

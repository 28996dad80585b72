//! Exact shortest-route search on geographic coordinates. Scores every
//! ordering of a small city set from a fixed origin using memoized
//! haversine distances and returns the provably shortest open route.

mod algo;
mod cache;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod point;
pub mod report;
mod route;

pub(crate) use algo::permutations;
pub(crate) use io::options;

pub use algo::solver::solve_exact;
pub use cache::DistanceCache;
pub use error::{Error, Result};
pub use geo::haversine_km;
pub use io::input::{load_cities, select_top_by_population};
pub use io::options::{LogFormat, LogLevel, SolverMode, SolverOptions};
pub use point::Point;
pub use route::{Route, route_cost};

//! Fleet allocation over demand routes.
//!
//! Buses are shared out in proportion to passenger demand, then each route's
//! share is turned into an hourly rate, a headway and a utilization figure.

pub mod allocation;
pub mod analysis;
pub mod recommendation;
pub mod statistics;

pub use allocation::{allocate, AllocationResult, MIN_BUSES_PER_HOUR, MIN_HEADWAY_MINUTES};
pub use analysis::{FleetPlanner, RouteAnalysis};
pub use recommendation::{recommend, Recommendation, RecommendationCategory};
pub use statistics::{FleetStatistics, HIGH_DEMAND_THRESHOLD};

/// Round to one decimal place
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

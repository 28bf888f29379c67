//! # milagro-transit
//!
//! Trip-time estimation and fleet allocation for the Milagro bus network.
//!
//! ## Features
//!
//! - **Trip estimates**: symmetric lookup of precomputed stop-to-stop segments
//! - **Blocked streets**: per-street time surcharge when a segment uses a blocked street
//! - **Fleet allocation**: demand-proportional split of the fleet with headway and utilization
//! - **Map scene**: drawable stops, streets and trip highlight for a presentation layer
//! - **Reference data**: built-in tables, or JSON files with the `serde` feature
//!
//! ## Example
//!
//! ```
//! use milagro_transit::prelude::*;
//!
//! let provider = StaticNetworkProvider::milagro();
//! let estimator = RouteTimeEstimator::new(&provider);
//!
//! let mut blocked = BlockedStreetSet::new();
//! blocked.add("Av. Jaime Roldós").unwrap();
//!
//! let trip = estimator.estimate("terminal", "milagro-norte", &blocked).unwrap();
//! assert_eq!(trip.total_minutes, 21);
//! assert!(trip.is_alternative);
//!
//! let planner = FleetPlanner::new(FleetConfig::milagro());
//! let allocations = planner.distribute().unwrap();
//! assert_eq!(allocations[5].assigned_buses, 18);
//! ```

pub mod blocked;
pub mod config;
pub mod estimator;
pub mod fleet;
pub mod identifiers;
pub mod map;
pub mod models;
pub mod provider;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::blocked::BlockedStreetSet;
    pub use crate::config::{FleetConfig, NetworkConfig, MILAGRO_FLEET_SIZE};
    pub use crate::estimator::{RouteTimeEstimator, TripEstimate};
    pub use crate::fleet::{
        allocate, recommend, AllocationResult, FleetPlanner, FleetStatistics, Recommendation,
        RecommendationCategory, RouteAnalysis,
    };
    pub use crate::identifiers::*;
    pub use crate::map::{MapScene, TripStyle};
    pub use crate::models::{schedule::ServiceWindow, traits::*, types::*};
    pub use crate::provider::StaticNetworkProvider;
}

pub use prelude::*;

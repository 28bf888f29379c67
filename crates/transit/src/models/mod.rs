//! Network data models, types, and traits.

pub mod schedule;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use schedule::ServiceWindow;
pub use traits::NetworkProvider;
pub use types::{DemandRoute, PriorityTier, Segment, Stop, StreetEdge, TransitError, Result};

//! Spatial indexing and query utilities for the 2D map.

pub mod index;
pub mod queries;

pub use queries::{map_distance, midpoint};

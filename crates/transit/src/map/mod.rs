//! Drawable description of the network map.

pub mod scene;

pub use scene::{EdgeLine, MapScene, StopMarker, TripOverlay, TripStyle};

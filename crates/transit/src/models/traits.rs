//! Provider trait for network reference data.
//!
//! The estimator and map scene only talk to this trait, so the data can come
//! from the built-in tables, a loaded file, or a test fixture.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;
use crate::models::types::*;

/// Read-only access to stops, segments and streets
pub trait NetworkProvider: Send + Sync {
    // ---- Lookups ----
    fn get_stop(&self, id: &StopIdentifier) -> Option<Arc<Stop>>;

    /// Segment for the unordered pair `(a, b)`.
    ///
    /// Implementations try the `a -> b` key first, then `b -> a`.
    fn find_segment(&self, a: &StopIdentifier, b: &StopIdentifier) -> Option<Arc<Segment>>;

    // ---- Collections ----
    fn all_stops(&self) -> Vec<Arc<Stop>>;
    fn all_segments(&self) -> Vec<Arc<Segment>>;

    /// Streets a user may block, in display order
    fn blockable_streets(&self) -> &[StreetName];

    /// Street lines drawn on the map
    fn street_edges(&self) -> &[StreetEdge];

    // ---- Spatial queries (map units) ----

    /// Stop closest to a map position
    fn nearest_stop(&self, point: Point) -> Option<Arc<Stop>>;

    /// Stops within `radius` of a map position
    fn stops_within(&self, point: Point, radius: f64) -> Vec<Arc<Stop>>;
}

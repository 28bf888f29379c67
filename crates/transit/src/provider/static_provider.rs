//! In-memory network provider backed by reference data.
//!
//! Stores stops and segments in lookup maps plus an R-tree over stop
//! positions for map picking.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use rstar::RTree;

use crate::blocked::BlockedStreetSet;
use crate::config::NetworkConfig;
use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::index::StopNode;

/// In-memory network provider with spatial indexing
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticNetworkProvider {
    // Core data
    stops: Vec<Arc<Stop>>,
    segments: Vec<Arc<Segment>>,
    streets: Vec<StreetName>,
    street_edges: Vec<StreetEdge>,

    // Lookup maps
    stop_map: HashMap<StopIdentifier, Arc<Stop>>,
    segment_map: HashMap<(StopIdentifier, StopIdentifier), Arc<Segment>>,

    // Spatial index
    stop_tree: RTree<StopNode>,
}

impl StaticNetworkProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self {
            stops: Vec::new(),
            segments: Vec::new(),
            streets: Vec::new(),
            street_edges: Vec::new(),
            stop_map: HashMap::new(),
            segment_map: HashMap::new(),
            stop_tree: RTree::new(),
        }
    }

    /// Build provider from raw data.
    ///
    /// Does not validate; use [`StaticNetworkProvider::from_config`] for
    /// untrusted input.
    pub fn from_data(
        stops: Vec<Stop>,
        segments: Vec<Segment>,
        streets: Vec<StreetName>,
        street_edges: Vec<StreetEdge>,
    ) -> Self {
        let stops: Vec<Arc<Stop>> = stops.into_iter().map(Arc::new).collect();
        let segments: Vec<Arc<Segment>> = segments.into_iter().map(Arc::new).collect();

        // Build lookup maps
        let stop_map: HashMap<_, _> = stops
            .iter()
            .map(|s| (s.id.clone(), s.clone()))
            .collect();

        // Keyed as stored; reverse direction is resolved at lookup time
        let segment_map: HashMap<_, _> = segments
            .iter()
            .map(|s| ((s.from.clone(), s.to.clone()), s.clone()))
            .collect();

        // Build spatial index
        let stop_tree = RTree::bulk_load(
            stops
                .iter()
                .map(|s| StopNode::new(s.position, s.clone()))
                .collect(),
        );

        Self {
            stops,
            segments,
            streets,
            street_edges,
            stop_map,
            segment_map,
            stop_tree,
        }
    }

    /// Validate a config and build a provider from its network tables
    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;

        log::debug!(
            "Building network provider: {} stops, {} segments, {} streets",
            config.stops.len(),
            config.segments.len(),
            config.streets.len()
        );

        Ok(Self::from_data(
            config.stops.clone(),
            config.segments.clone(),
            config.streets.clone(),
            config.street_edges.clone(),
        ))
    }

    /// Built-in Milagro network
    pub fn milagro() -> Self {
        let config = NetworkConfig::milagro();
        Self::from_data(config.stops, config.segments, config.streets, config.street_edges)
    }

    /// Blockable streets not yet in `blocked`, in display order
    pub fn available_streets(&self, blocked: &BlockedStreetSet) -> Vec<StreetName> {
        self.streets
            .iter()
            .filter(|s| !blocked.contains(s))
            .cloned()
            .collect()
    }

    /// Segments that traverse `street`
    pub fn segments_using(&self, street: &StreetName) -> Vec<Arc<Segment>> {
        self.segments
            .iter()
            .filter(|s| s.uses_street(street))
            .cloned()
            .collect()
    }
}

impl Default for StaticNetworkProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkProvider for StaticNetworkProvider {
    fn get_stop(&self, id: &StopIdentifier) -> Option<Arc<Stop>> {
        self.stop_map.get(id).cloned()
    }

    fn find_segment(&self, a: &StopIdentifier, b: &StopIdentifier) -> Option<Arc<Segment>> {
        self.segment_map
            .get(&(a.clone(), b.clone()))
            .or_else(|| self.segment_map.get(&(b.clone(), a.clone())))
            .cloned()
    }

    fn all_stops(&self) -> Vec<Arc<Stop>> {
        self.stops.clone()
    }

    fn all_segments(&self) -> Vec<Arc<Segment>> {
        self.segments.clone()
    }

    fn blockable_streets(&self) -> &[StreetName] {
        &self.streets
    }

    fn street_edges(&self) -> &[StreetEdge] {
        &self.street_edges
    }

    fn nearest_stop(&self, point: Point) -> Option<Arc<Stop>> {
        self.stop_tree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|node| node.stop.clone())
    }

    fn stops_within(&self, point: Point, radius: f64) -> Vec<Arc<Stop>> {
        // Validate radius is positive
        if radius <= 0.0 || !radius.is_finite() {
            return Vec::new();
        }

        self.stop_tree
            .locate_within_distance([point.x(), point.y()], radius * radius)
            .map(|node| node.stop.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StopIdentifier {
        StopIdentifier::new(s)
    }

    #[test]
    fn test_empty_provider() {
        let provider = StaticNetworkProvider::new();
        assert_eq!(provider.all_stops().len(), 0);
        assert_eq!(provider.all_segments().len(), 0);
        assert!(provider.nearest_stop(Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_provider_lookups() {
        let provider = StaticNetworkProvider::milagro();

        assert_eq!(provider.all_stops().len(), 5);
        assert_eq!(provider.all_segments().len(), 10);

        let stop = provider.get_stop(&id("unemi")).unwrap();
        assert_eq!(&*stop.name, "UNEMI");
        assert!(provider.get_stop(&id("centro")).is_none());
    }

    #[test]
    fn test_segment_lookup_is_symmetric() {
        let provider = StaticNetworkProvider::milagro();

        let forward = provider.find_segment(&id("terminal"), &id("unemi")).unwrap();
        let reverse = provider.find_segment(&id("unemi"), &id("terminal")).unwrap();
        assert!(Arc::ptr_eq(&forward, &reverse));
        assert_eq!(forward.baseline_minutes, 12);

        assert!(provider.find_segment(&id("terminal"), &id("terminal")).is_none());
    }

    #[test]
    fn test_available_streets() {
        let provider = StaticNetworkProvider::milagro();
        let blocked: BlockedStreetSet = ["Av. Norte", "Av. García Moreno"].into_iter().collect();

        let available = provider.available_streets(&blocked);
        assert_eq!(available.len(), provider.blockable_streets().len() - 2);
        assert!(!available.contains(&StreetName::new("Av. Norte")));
        assert_eq!(available[0].as_str(), "Calle 8 de Noviembre");
    }

    #[test]
    fn test_segments_using_street() {
        let provider = StaticNetworkProvider::milagro();
        let using = provider.segments_using(&StreetName::new("Calle Estudiantes"));
        assert_eq!(using.len(), 4);
    }

    #[test]
    fn test_spatial_queries() {
        let provider = StaticNetworkProvider::milagro();

        // Click just beside the Terminal marker at (100, 150)
        let nearest = provider.nearest_stop(Point::new(104.0, 146.0)).unwrap();
        assert_eq!(nearest.id.as_str(), "terminal");

        let nearby = provider.stops_within(Point::new(100.0, 150.0), 12.0);
        assert_eq!(nearby.len(), 1);

        // UNEMI (200, 100) is ~111.8 away from Terminal
        let nearby = provider.stops_within(Point::new(100.0, 150.0), 120.0);
        assert_eq!(nearby.len(), 2);

        assert!(provider.stops_within(Point::new(100.0, 150.0), -1.0).is_empty());
    }
}

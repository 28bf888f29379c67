//! What the map shows for a given blocked set and selected trip.
//!
//! The scene is plain data; turning it into pixels, SVG or GeoJSON is up to the caller.

use std::sync::Arc;

use geo::Point;

use crate::blocked::BlockedStreetSet;
use crate::estimator::TripEstimate;
use crate::identifiers::*;
use crate::models::traits::NetworkProvider;
use crate::spatial::midpoint;

/// Street labels sit this far above the middle of their line
const LABEL_OFFSET: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StopMarker {
    pub id: StopIdentifier,
    pub name: Arc<str>,
    pub position: Point,
    pub color: Arc<str>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EdgeLine {
    pub name: StreetName,
    pub start: Point,
    pub end: Point,
    pub label_anchor: Point,
    pub blocked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum TripStyle {
    Direct,
    Alternative,
}

/// Highlight for the selected trip
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TripOverlay {
    pub start: Point,
    pub end: Point,
    pub style: TripStyle,
    /// Where the bus icon goes
    pub bus_marker: Point,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapScene {
    pub edges: Vec<EdgeLine>,
    pub trip: Option<TripOverlay>,
    pub stops: Vec<StopMarker>,
}

impl MapScene {
    /// Build the scene.
    ///
    /// Edges whose stops are unknown to the provider are left out.
    pub fn build<P: NetworkProvider + ?Sized>(
        provider: &P,
        blocked: &BlockedStreetSet,
        trip: Option<&TripEstimate>,
    ) -> Self {
        let edges = provider
            .street_edges()
            .iter()
            .filter_map(|edge| {
                let from = provider.get_stop(&edge.from)?;
                let to = provider.get_stop(&edge.to)?;
                let mid = midpoint(from.position, to.position);
                Some(EdgeLine {
                    name: edge.name.clone(),
                    start: from.position,
                    end: to.position,
                    label_anchor: Point::new(mid.x(), mid.y() - LABEL_OFFSET),
                    blocked: blocked.contains(&edge.name),
                })
            })
            .collect();

        let trip = trip.map(|t| TripOverlay {
            start: t.origin.position,
            end: t.destination.position,
            style: if t.is_alternative {
                TripStyle::Alternative
            } else {
                TripStyle::Direct
            },
            bus_marker: midpoint(t.origin.position, t.destination.position),
        });

        let stops = provider
            .all_stops()
            .iter()
            .map(|s| StopMarker {
                id: s.id.clone(),
                name: s.name.clone(),
                position: s.position,
                color: s.color.clone(),
            })
            .collect();

        Self { edges, trip, stops }
    }

    pub fn blocked_edges(&self) -> impl Iterator<Item = &EdgeLine> {
        self.edges.iter().filter(|e| e.blocked)
    }
}

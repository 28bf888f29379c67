//! Core data types and enums for the bus network.

use std::fmt;
use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Demand priority tier of an allocation route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriorityTier {
    #[cfg_attr(feature = "serde", serde(rename = "muy-alta"))]
    VeryHigh,
    #[cfg_attr(feature = "serde", serde(rename = "alta"))]
    High,
    #[cfg_attr(feature = "serde", serde(rename = "media"))]
    Medium,
    #[cfg_attr(feature = "serde", serde(rename = "baja"))]
    Low,
}

impl PriorityTier {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "muy-alta" => Some(Self::VeryHigh),
            "alta" => Some(Self::High),
            "media" => Some(Self::Medium),
            "baja" => Some(Self::Low),
            _ => None,
        }
    }

    /// Key used in reference data files
    pub fn key(&self) -> &'static str {
        match self {
            Self::VeryHigh => "muy-alta",
            Self::High => "alta",
            Self::Medium => "media",
            Self::Low => "baja",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryHigh => "Muy Alta",
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A bus stop on the map.
///
/// `position` and `color` only matter for drawing; calculations key off `id`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub id: StopIdentifier,
    pub name: Arc<str>,
    pub position: Point,
    pub color: Arc<str>,
}

/// Precomputed travel data between two adjacent stops.
///
/// The pair is unordered: a segment stored as `from -> to` also answers `to -> from`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub from: StopIdentifier,
    pub to: StopIdentifier,
    pub distance_km: f64,
    pub baseline_minutes: u32,
    /// Streets traversed, in travel order
    pub streets: Vec<StreetName>,
}

impl Segment {
    pub fn connects(&self, a: &StopIdentifier, b: &StopIdentifier) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    pub fn uses_street(&self, street: &StreetName) -> bool {
        self.streets.contains(street)
    }
}

/// A named street drawn between two stops on the map
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetEdge {
    pub from: StopIdentifier,
    pub to: StopIdentifier,
    pub name: StreetName,
}

/// A bus route with its passenger demand, as used for fleet allocation.
///
/// Endpoints are display labels, not stop ids.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandRoute {
    pub from: Arc<str>,
    pub to: Arc<str>,
    /// Passengers per hour
    pub frequency: u32,
    pub priority: PriorityTier,
}

impl DemandRoute {
    pub fn new(from: &str, to: &str, frequency: u32, priority: PriorityTier) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            frequency,
            priority,
        }
    }

    /// Lookup key, `"{from}-{to}"`
    pub fn key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

impl fmt::Display for DemandRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("No direct connection between {origin} and {destination}")]
    RouteNotFound {
        origin: StopIdentifier,
        destination: StopIdentifier,
    },

    #[error("Fleet allocation needs at least one route, positive demand and a non-empty fleet")]
    EmptyFleetInput,

    #[error("Stop not found: {0}")]
    StopNotFound(StopIdentifier),

    #[error("Demand route not found: {0}")]
    DemandRouteNotFound(String),

    #[error("Street already blocked: {0}")]
    AlreadyBlocked(StreetName),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;

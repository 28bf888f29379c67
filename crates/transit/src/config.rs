//! Reference data for the network and the fleet.
//!
//! [`NetworkConfig::milagro`] carries the built-in tables. With the `serde`
//! feature the same structure can be loaded from a JSON file instead.

use std::collections::HashSet;
use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;
use crate::models::schedule::ServiceWindow;
use crate::models::types::*;

/// Buses available in the built-in fleet
pub const MILAGRO_FLEET_SIZE: u32 = 70;

/// Routes and fleet used for allocation
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetConfig {
    pub total_buses: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub service: ServiceWindow,
    pub routes: Vec<DemandRoute>,
}

/// Everything the engine needs, loaded once at start
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    pub stops: Vec<Stop>,
    pub segments: Vec<Segment>,
    /// Streets a user may block
    pub streets: Vec<StreetName>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub street_edges: Vec<StreetEdge>,
    pub fleet: FleetConfig,
}

impl NetworkConfig {
    /// Check internal consistency of the tables
    pub fn validate(&self) -> Result<()> {
        let mut stop_ids = HashSet::new();
        for stop in &self.stops {
            if stop.id.is_empty() {
                return invalid(format!("stop '{}' has an empty id", stop.name));
            }
            if !stop_ids.insert(&stop.id) {
                return invalid(format!("duplicate stop id '{}'", stop.id));
            }
        }

        let known_streets: HashSet<_> = self.streets.iter().collect();
        for (i, seg) in self.segments.iter().enumerate() {
            for end in [&seg.from, &seg.to] {
                if !stop_ids.contains(end) {
                    return invalid(format!("segment {}-{} references unknown stop '{}'", seg.from, seg.to, end));
                }
            }
            if seg.from == seg.to {
                return invalid(format!("segment {}-{} connects a stop to itself", seg.from, seg.to));
            }
            if !(seg.distance_km.is_finite() && seg.distance_km > 0.0) {
                return invalid(format!("segment {}-{} has distance {}", seg.from, seg.to, seg.distance_km));
            }
            if seg.baseline_minutes == 0 {
                return invalid(format!("segment {}-{} has zero baseline time", seg.from, seg.to));
            }
            if seg.streets.is_empty() {
                return invalid(format!("segment {}-{} lists no streets", seg.from, seg.to));
            }

            // a-b and b-a are the same segment
            if self.segments[..i].iter().any(|other| other.connects(&seg.from, &seg.to)) {
                return invalid(format!("duplicate segment {}-{}", seg.from, seg.to));
            }

            for street in &seg.streets {
                if !known_streets.contains(street) {
                    log::warn!(
                        "Street '{}' on segment {}-{} is not in the blockable street list",
                        street,
                        seg.from,
                        seg.to
                    );
                }
            }
        }

        for edge in &self.street_edges {
            if !stop_ids.contains(&edge.from) || !stop_ids.contains(&edge.to) {
                return invalid(format!("street edge '{}' references an unknown stop", edge.name));
            }
        }

        self.fleet.validate()?;

        log::debug!(
            "Reference data ok: {} stops, {} segments, {} demand routes",
            self.stops.len(),
            self.segments.len(),
            self.fleet.routes.len()
        );

        Ok(())
    }

    /// Built-in Milagro network and fleet
    pub fn milagro() -> Self {
        Self {
            stops: vec![
                stop("terminal", "Terminal", 100.0, 150.0, "#ef4444"),
                stop("unemi", "UNEMI", 200.0, 100.0, "#3b82f6"),
                stop("milagro-norte", "Milagro Norte", 350.0, 80.0, "#10b981"),
                stop("los-vergeles", "Los Vergeles", 200.0, 250.0, "#f59e0b"),
                stop("colegio-17", "Colegio 17 de Septiembre", 400.0, 180.0, "#8b5cf6"),
            ],
            segments: vec![
                segment("terminal", "unemi", 3.2, 12, &["Av. García Moreno", "Calle 8 de Noviembre"]),
                segment("terminal", "milagro-norte", 4.1, 15, &["Av. Jaime Roldós", "Av. 17 de Septiembre"]),
                segment("terminal", "los-vergeles", 2.8, 10, &["Calle Bolívar", "Av. Los Vergeles"]),
                segment("terminal", "colegio-17", 3.5, 13, &["Av. García Moreno", "Calle Estudiantes"]),
                segment("unemi", "milagro-norte", 2.1, 8, &["Av. Universitaria", "Av. 17 de Septiembre"]),
                segment("unemi", "los-vergeles", 1.8, 7, &["Calle Universidad", "Av. Los Vergeles"]),
                segment("unemi", "colegio-17", 2.3, 9, &["Av. Universitaria", "Calle Estudiantes"]),
                segment("milagro-norte", "los-vergeles", 3.0, 11, &["Av. Norte", "Av. Los Vergeles"]),
                segment("milagro-norte", "colegio-17", 1.9, 7, &["Av. 17 de Septiembre", "Calle Estudiantes"]),
                segment("los-vergeles", "colegio-17", 2.5, 9, &["Av. Los Vergeles", "Calle Estudiantes"]),
            ],
            streets: [
                "Av. García Moreno",
                "Calle 8 de Noviembre",
                "Av. Jaime Roldós",
                "Av. 17 de Septiembre",
                "Calle Bolívar",
                "Av. Los Vergeles",
                "Calle Estudiantes",
                "Av. Universitaria",
                "Calle Universidad",
                "Av. Norte",
            ]
            .into_iter()
            .map(StreetName::new)
            .collect(),
            street_edges: vec![
                edge("terminal", "unemi", "Av. García Moreno"),
                edge("terminal", "milagro-norte", "Av. Jaime Roldós"),
                edge("terminal", "los-vergeles", "Calle Bolívar"),
                edge("unemi", "milagro-norte", "Av. Universitaria"),
                edge("unemi", "los-vergeles", "Calle Universidad"),
                edge("unemi", "colegio-17", "Av. Universitaria"),
                edge("milagro-norte", "colegio-17", "Av. 17 de Septiembre"),
                edge("los-vergeles", "colegio-17", "Av. Los Vergeles"),
            ],
            fleet: FleetConfig::milagro(),
        }
    }
}

impl FleetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.total_buses == 0 {
            return invalid("fleet has no buses".into());
        }
        if self.service.hours == 0 || self.service.hours > 24 {
            return invalid(format!("service window of {} hours", self.service.hours));
        }

        let mut keys = HashSet::new();
        for route in &self.routes {
            if route.frequency == 0 {
                return invalid(format!("route {} has zero demand", route));
            }
            if !keys.insert(route.key()) {
                return invalid(format!("duplicate demand route {}", route.key()));
            }
        }
        Ok(())
    }

    /// Six demand routes sharing 70 buses
    pub fn milagro() -> Self {
        Self {
            total_buses: MILAGRO_FLEET_SIZE,
            service: ServiceWindow::default(),
            routes: vec![
                DemandRoute::new("Centro", "Colegio 17 de septiembre", 95, PriorityTier::Medium),
                DemandRoute::new("Colegio 17 de septiembre", "UNEMI", 55, PriorityTier::Low),
                DemandRoute::new("UNEMI", "Terminal Terrestre", 145, PriorityTier::High),
                DemandRoute::new("Terminal Terrestre", "Milagro Norte", 180, PriorityTier::VeryHigh),
                DemandRoute::new("Milagro Norte", "Cdla. Los Vergeles", 160, PriorityTier::High),
                DemandRoute::new("Los Vergeles", "UNEMI", 220, PriorityTier::VeryHigh),
            ],
        }
    }
}

#[cfg(feature = "serde")]
impl NetworkConfig {
    /// Parse and validate JSON reference data
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TransitError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON reference data file
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            TransitError::SerializationError(format!("reading {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded {} bytes of reference data from {}", json.len(), path.display());
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TransitError::SerializationError(e.to_string()))
    }
}

fn invalid<T>(msg: String) -> Result<T> {
    Err(TransitError::InvalidData(msg))
}

fn stop(id: &str, name: &str, x: f64, y: f64, color: &str) -> Stop {
    Stop {
        id: StopIdentifier::new(id),
        name: Arc::from(name),
        position: Point::new(x, y),
        color: Arc::from(color),
    }
}

fn segment(from: &str, to: &str, distance_km: f64, baseline_minutes: u32, streets: &[&str]) -> Segment {
    Segment {
        from: StopIdentifier::new(from),
        to: StopIdentifier::new(to),
        distance_km,
        baseline_minutes,
        streets: streets.iter().map(StreetName::new).collect(),
    }
}

fn edge(from: &str, to: &str, name: &str) -> StreetEdge {
    StreetEdge {
        from: StopIdentifier::new(from),
        to: StopIdentifier::new(to),
        name: StreetName::new(name),
    }
}

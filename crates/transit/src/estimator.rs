//! Trip time estimation between two adjacent stops.
//!
//! The network is a fixed table of stop pairs, so an estimate is a symmetric
//! lookup followed by a surcharge for each blocked street on the segment.

use std::sync::Arc;

use crate::blocked::BlockedStreetSet;
use crate::identifiers::*;
use crate::models::{traits::NetworkProvider, types::*};

/// Share of the baseline time added for every blocked street on the path
pub const BLOCKED_STREET_SURCHARGE: f64 = 0.4;

/// Result of a trip query. Immutable once returned.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TripEstimate {
    pub origin: Arc<Stop>,
    pub destination: Arc<Stop>,
    pub distance_km: f64,
    pub baseline_minutes: u32,
    pub additional_minutes: u32,
    pub total_minutes: u32,
    /// Streets on the segment, in travel order
    pub streets: Vec<StreetName>,
    /// Subset of `streets` that is currently blocked
    pub blocked_streets_in_route: Vec<StreetName>,
    /// A detour is needed around at least one blocked street
    pub is_alternative: bool,
    /// Human-readable explanation of the total
    pub breakdown: Vec<String>,
}

impl TripEstimate {
    pub fn is_direct(&self) -> bool {
        !self.is_alternative
    }
}

/// Minutes added for each blocked street on a segment.
///
/// Never below one minute, so a blocked street always costs something. The
/// floor only matters for 1-minute baselines, where `round(0.4)` would be 0.
pub fn surcharge_per_street(baseline_minutes: u32) -> u32 {
    ((f64::from(baseline_minutes) * BLOCKED_STREET_SURCHARGE).round() as u32).max(1)
}

/// Estimates trip times over a network provider
pub struct RouteTimeEstimator<'a, P: NetworkProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: NetworkProvider + ?Sized> RouteTimeEstimator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Estimate travel between two stops given the blocked streets.
    ///
    /// Fails with `InvalidSelection` for a missing or repeated stop and with
    /// `RouteNotFound` when the pair has no segment in either direction.
    pub fn estimate(
        &self,
        origin: &str,
        destination: &str,
        blocked: &BlockedStreetSet,
    ) -> Result<TripEstimate> {
        let origin = StopIdentifier::new(origin);
        let destination = StopIdentifier::new(destination);

        if origin.is_empty() || destination.is_empty() {
            return Err(TransitError::InvalidSelection(
                "select both an origin and a destination".into(),
            ));
        }
        if origin == destination {
            return Err(TransitError::InvalidSelection(
                "origin and destination must differ".into(),
            ));
        }

        let segment = self
            .provider
            .find_segment(&origin, &destination)
            .ok_or_else(|| TransitError::RouteNotFound {
                origin: origin.clone(),
                destination: destination.clone(),
            })?;

        let origin_stop = self
            .provider
            .get_stop(&origin)
            .ok_or_else(|| TransitError::StopNotFound(origin.clone()))?;
        let destination_stop = self
            .provider
            .get_stop(&destination)
            .ok_or_else(|| TransitError::StopNotFound(destination.clone()))?;

        let blocked_in_route: Vec<StreetName> = segment
            .streets
            .iter()
            .filter(|street| blocked.contains(street))
            .cloned()
            .collect();

        let baseline = segment.baseline_minutes;
        let mut breakdown = Vec::new();

        let additional = if blocked_in_route.is_empty() {
            breakdown.push(format!("Direct route available: {} min", baseline));
            0
        } else {
            let additional = blocked_in_route.len() as u32 * surcharge_per_street(baseline);
            breakdown.push(format!("Base time: {} min", baseline));
            breakdown.push(format!(
                "Additional time for {} blocked street(s): +{} min",
                blocked_in_route.len(),
                additional
            ));
            breakdown.push(format!("Estimated total time: {} min", baseline + additional));
            additional
        };

        Ok(TripEstimate {
            origin: origin_stop,
            destination: destination_stop,
            distance_km: segment.distance_km,
            baseline_minutes: baseline,
            additional_minutes: additional,
            total_minutes: baseline + additional,
            streets: segment.streets.clone(),
            is_alternative: !blocked_in_route.is_empty(),
            blocked_streets_in_route: blocked_in_route,
            breakdown,
        })
    }
}

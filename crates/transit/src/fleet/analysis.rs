//! Per-route analysis on top of the fleet allocation.

use chrono::NaiveTime;

use crate::config::FleetConfig;
use crate::models::types::*;

use super::allocation::{allocate, AllocationResult};
use super::recommendation::{recommend, Recommendation};
use super::statistics::FleetStatistics;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteAnalysis {
    pub allocation: AllocationResult,
    /// Trips over the configured service window
    pub daily_trips: u32,
    pub recommendation: Recommendation,
}

/// Runs allocation queries against one fleet configuration.
///
/// Holds no results; every call recomputes from the routes.
#[derive(Clone, Debug)]
pub struct FleetPlanner {
    fleet: FleetConfig,
}

impl FleetPlanner {
    pub fn new(fleet: FleetConfig) -> Self {
        Self { fleet }
    }

    pub fn fleet(&self) -> &FleetConfig {
        &self.fleet
    }

    pub fn distribute(&self) -> Result<Vec<AllocationResult>> {
        allocate(&self.fleet.routes, self.fleet.total_buses)
    }

    pub fn statistics(&self) -> Result<FleetStatistics> {
        let allocations = self.distribute()?;
        Ok(FleetStatistics::from_allocations(&allocations, self.fleet.total_buses))
    }

    /// Analyse the route whose key (`"{from}-{to}"`) matches
    pub fn analyze(&self, route_key: &str) -> Result<RouteAnalysis> {
        let allocation = self.find(route_key)?;
        Ok(RouteAnalysis {
            daily_trips: self.fleet.service.daily_trips(allocation.buses_per_hour),
            recommendation: recommend(allocation.utilization),
            allocation,
        })
    }

    /// Departure times for a route across the service window
    pub fn timetable(&self, route_key: &str) -> Result<Vec<NaiveTime>> {
        let allocation = self.find(route_key)?;
        Ok(self.fleet.service.departures(allocation.headway_minutes))
    }

    fn find(&self, route_key: &str) -> Result<AllocationResult> {
        self.distribute()?
            .into_iter()
            .find(|a| a.route.key() == route_key)
            .ok_or_else(|| TransitError::DemandRouteNotFound(route_key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::RecommendationCategory;

    #[test]
    fn test_analyze_route() {
        let planner = FleetPlanner::new(FleetConfig::milagro());
        let analysis = planner.analyze("Los Vergeles-UNEMI").unwrap();

        assert_eq!(analysis.allocation.assigned_buses, 18);
        assert_eq!(analysis.allocation.buses_per_hour, 9);
        assert_eq!(analysis.daily_trips, 108);
        assert_eq!(analysis.recommendation.category, RecommendationCategory::ReassignBuses);
    }

    #[test]
    fn test_analyze_unknown_route() {
        let planner = FleetPlanner::new(FleetConfig::milagro());
        let err = planner.analyze("Centro-Terminal").unwrap_err();
        assert!(matches!(err, TransitError::DemandRouteNotFound(ref k) if k == "Centro-Terminal"));
    }

    #[test]
    fn test_timetable() {
        let planner = FleetPlanner::new(FleetConfig::milagro());
        // 15 minute headway over 12 hours
        let times = planner.timetable("Centro-Colegio 17 de septiembre").unwrap();
        assert_eq!(times.len(), 48);
        assert_eq!(times[0], NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(times[47], NaiveTime::from_hms_opt(17, 45, 0).unwrap());
    }

    #[test]
    fn test_empty_fleet_propagates() {
        let mut fleet = FleetConfig::milagro();
        fleet.routes.clear();
        let planner = FleetPlanner::new(fleet);

        assert!(matches!(planner.distribute(), Err(TransitError::EmptyFleetInput)));
        assert!(matches!(planner.statistics(), Err(TransitError::EmptyFleetInput)));
    }
}

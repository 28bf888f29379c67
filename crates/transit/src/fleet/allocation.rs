//! Proportional split of the fleet across routes.

use crate::models::types::*;

use super::round_to_tenth;

/// Every route gets at least this many buses per hour
pub const MIN_BUSES_PER_HOUR: u32 = 1;

/// Headways are never shorter than this
pub const MIN_HEADWAY_MINUTES: u32 = 5;

/// Buses on a route are split over this many shifts
const SHIFTS: f64 = 2.0;

/// Allocation of the fleet to one route
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AllocationResult {
    pub route: DemandRoute,
    pub assigned_buses: u32,
    pub buses_per_hour: u32,
    pub headway_minutes: u32,
    /// Percent of hourly capacity in use, 0-100 with one decimal
    pub utilization: f64,
}

/// Share `total_buses` across `routes` in proportion to their demand.
///
/// Results follow the order of `routes`. Each route is rounded on its own, so
/// the assigned total can differ from `total_buses` by up to one bus per route.
pub fn allocate(routes: &[DemandRoute], total_buses: u32) -> Result<Vec<AllocationResult>> {
    let total_demand: u64 = routes.iter().map(|r| u64::from(r.frequency)).sum();
    if routes.is_empty() || total_demand == 0 || total_buses == 0 {
        return Err(TransitError::EmptyFleetInput);
    }

    Ok(routes
        .iter()
        .map(|route| {
            let share = f64::from(route.frequency) / total_demand as f64;
            let assigned_buses = (share * f64::from(total_buses)).round() as u32;
            let buses_per_hour =
                ((f64::from(assigned_buses) / SHIFTS).round() as u32).max(MIN_BUSES_PER_HOUR);
            let headway_minutes =
                ((60.0 / f64::from(buses_per_hour)).round() as u32).max(MIN_HEADWAY_MINUTES);
            let capacity = f64::from(buses_per_hour) * 60.0;
            let utilization = round_to_tenth((f64::from(route.frequency) / capacity * 100.0).min(100.0));

            AllocationResult {
                route: route.clone(),
                assigned_buses,
                buses_per_hour,
                headway_minutes,
                utilization,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FleetConfig;
    use approx::assert_relative_eq;

    fn demand(frequencies: &[u32]) -> Vec<DemandRoute> {
        frequencies
            .iter()
            .enumerate()
            .map(|(i, f)| DemandRoute::new(&format!("A{}", i), &format!("B{}", i), *f, PriorityTier::Medium))
            .collect()
    }

    #[test]
    fn test_milagro_distribution() {
        let fleet = FleetConfig::milagro();
        let results = allocate(&fleet.routes, fleet.total_buses).unwrap();

        let assigned: Vec<u32> = results.iter().map(|r| r.assigned_buses).collect();
        assert_eq!(assigned, vec![8, 5, 12, 15, 13, 18]);

        let per_hour: Vec<u32> = results.iter().map(|r| r.buses_per_hour).collect();
        assert_eq!(per_hour, vec![4, 3, 6, 8, 7, 9]);

        let headways: Vec<u32> = results.iter().map(|r| r.headway_minutes).collect();
        assert_eq!(headways, vec![15, 20, 10, 8, 9, 7]);

        let utilization: Vec<f64> = results.iter().map(|r| r.utilization).collect();
        for (actual, expected) in utilization.iter().zip([39.6, 30.6, 40.3, 37.5, 38.1, 40.7]) {
            assert_relative_eq!(*actual, expected);
        }

        // Order follows input
        assert_eq!(&*results[5].route.from, "Los Vergeles");
    }

    #[test]
    fn test_small_share_still_gets_service() {
        let results = allocate(&demand(&[1000, 1]), 10).unwrap();

        assert_eq!(results[1].assigned_buses, 0);
        assert_eq!(results[1].buses_per_hour, MIN_BUSES_PER_HOUR);
        assert_eq!(results[1].headway_minutes, 60);
    }

    #[test]
    fn test_headway_floor() {
        // 40 buses -> 20 per hour -> 3 min headway, floored at 5
        let results = allocate(&demand(&[100]), 40).unwrap();
        assert_eq!(results[0].buses_per_hour, 20);
        assert_eq!(results[0].headway_minutes, MIN_HEADWAY_MINUTES);
    }

    #[test]
    fn test_utilization_saturates() {
        // 500 passengers on one bus per hour is far over capacity
        let results = allocate(&demand(&[500]), 1).unwrap();
        assert_relative_eq!(results[0].utilization, 100.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(allocate(&[], 70), Err(TransitError::EmptyFleetInput)));
        assert!(matches!(allocate(&demand(&[0, 0]), 70), Err(TransitError::EmptyFleetInput)));
        assert!(matches!(
            allocate(&FleetConfig::milagro().routes, 0),
            Err(TransitError::EmptyFleetInput)
        ));
    }
}

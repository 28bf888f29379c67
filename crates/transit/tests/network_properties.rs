//! Behaviour of the engine over the whole built-in Milagro network.

use milagro_transit::prelude::*;

fn milagro() -> StaticNetworkProvider {
    StaticNetworkProvider::milagro()
}

#[test]
fn test_every_segment_is_symmetric() {
    let provider = milagro();
    let estimator = RouteTimeEstimator::new(&provider);
    let none = BlockedStreetSet::new();

    for segment in provider.all_segments() {
        let forward = estimator.estimate(segment.from.as_str(), segment.to.as_str(), &none).unwrap();
        let reverse = estimator.estimate(segment.to.as_str(), segment.from.as_str(), &none).unwrap();

        assert_eq!(forward.distance_km, reverse.distance_km);
        assert_eq!(forward.baseline_minutes, reverse.baseline_minutes);
        assert_eq!(forward.origin.id, reverse.destination.id);
    }
}

#[test]
fn test_same_stop_is_invalid_for_every_stop() {
    let provider = milagro();
    let estimator = RouteTimeEstimator::new(&provider);
    let blocked: BlockedStreetSet = provider.blockable_streets().iter().cloned().collect();

    for stop in provider.all_stops() {
        let err = estimator.estimate(stop.id.as_str(), stop.id.as_str(), &blocked).unwrap_err();
        assert!(matches!(err, TransitError::InvalidSelection(_)));
    }
}

#[test]
fn test_unknown_pair_is_route_not_found() {
    let provider = milagro();
    let estimator = RouteTimeEstimator::new(&provider);

    let err = estimator
        .estimate("nonexistent-a", "nonexistent-b", &BlockedStreetSet::new())
        .unwrap_err();
    assert!(matches!(err, TransitError::RouteNotFound { .. }));
}

#[test]
fn test_penalty_only_when_path_is_blocked() {
    let provider = milagro();
    let estimator = RouteTimeEstimator::new(&provider);

    for segment in provider.all_segments() {
        // Everything except this segment's streets
        let elsewhere: BlockedStreetSet = provider
            .blockable_streets()
            .iter()
            .filter(|s| !segment.uses_street(s))
            .cloned()
            .collect();
        let trip = estimator.estimate(segment.from.as_str(), segment.to.as_str(), &elsewhere).unwrap();
        assert_eq!(trip.total_minutes, trip.baseline_minutes);
        assert!(!trip.is_alternative);

        let all_on_path: BlockedStreetSet = segment.streets.iter().cloned().collect();
        let trip = estimator.estimate(segment.from.as_str(), segment.to.as_str(), &all_on_path).unwrap();
        assert!(trip.total_minutes > trip.baseline_minutes);
        assert!(trip.is_alternative);
        assert_eq!(trip.blocked_streets_in_route, segment.streets);
    }
}

#[test]
fn test_terminal_to_milagro_norte_with_roldos_blocked() {
    let provider = milagro();
    let estimator = RouteTimeEstimator::new(&provider);
    let mut blocked = BlockedStreetSet::new();
    blocked.add("Av. Jaime Roldós").unwrap();

    let trip = estimator.estimate("terminal", "milagro-norte", &blocked).unwrap();
    assert_eq!(trip.distance_km, 4.1);
    assert_eq!(trip.baseline_minutes, 15);
    assert_eq!(trip.total_minutes, 21);
    assert!(trip.is_alternative);
}

#[test]
fn test_allocation_invariants() {
    let fleet = FleetConfig::milagro();
    let results = allocate(&fleet.routes, 70).unwrap();

    assert_eq!(results.len(), fleet.routes.len());
    let assigned: i64 = results.iter().map(|r| i64::from(r.assigned_buses)).sum();
    assert!((assigned - 70).abs() <= fleet.routes.len() as i64);

    for (result, route) in results.iter().zip(&fleet.routes) {
        assert_eq!(&result.route, route);
        assert!(result.buses_per_hour >= 1);
        assert!(result.headway_minutes >= 5);
        assert!((0.0..=100.0).contains(&result.utilization));
    }
}

#[test]
fn test_allocation_invariants_hold_for_other_fleet_sizes() {
    let fleet = FleetConfig::milagro();
    for total in [1, 6, 13, 70, 250] {
        let results = allocate(&fleet.routes, total).unwrap();
        let assigned: i64 = results.iter().map(|r| i64::from(r.assigned_buses)).sum();
        assert!((assigned - i64::from(total)).abs() <= fleet.routes.len() as i64);
        assert!(results.iter().all(|r| r.buses_per_hour >= 1 && r.headway_minutes >= 5));
        assert!(results.iter().all(|r| (0.0..=100.0).contains(&r.utilization)));
    }
}

#[test]
fn test_degenerate_allocation_input() {
    assert!(matches!(allocate(&[], 70), Err(TransitError::EmptyFleetInput)));
    assert!(matches!(
        allocate(&FleetConfig::milagro().routes, 0),
        Err(TransitError::EmptyFleetInput)
    ));
}

#[test]
fn test_busiest_route_gets_eighteen_buses() {
    let routes: Vec<DemandRoute> = [95, 55, 145, 180, 160, 220]
        .into_iter()
        .enumerate()
        .map(|(i, f)| DemandRoute::new(&format!("O{}", i), &format!("D{}", i), f, PriorityTier::High))
        .collect();

    let results = allocate(&routes, 70).unwrap();
    assert_eq!(results[5].route.frequency, 220);
    assert_eq!(results[5].assigned_buses, 18);
}

#[test]
fn test_recommendation_categories() {
    assert_eq!(recommend(92.0).category.as_str(), "reassign-more-buses");
    assert_eq!(recommend(75.0).category.as_str(), "maintain");
    assert_eq!(recommend(55.0).category.as_str(), "optimize-capacity");
    assert_eq!(recommend(10.0).category.as_str(), "reassign-buses");
}

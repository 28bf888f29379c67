//! Plain-text rendering of engine results for the terminal.

use chrono::NaiveTime;
use milagro_transit::prelude::*;
use serde::Serialize;
use std::fmt::Write;

/// A stop and how far it is from a queried map position
#[derive(Debug, Serialize)]
pub struct StopDistance {
    pub id: String,
    pub name: String,
    pub distance: f64,
}

pub fn stops(stops: &[std::sync::Arc<Stop>]) -> String {
    let mut out = String::new();
    for stop in stops {
        let _ = writeln!(
            out,
            "{:<16} {:<28} ({:>5.0}, {:>5.0})",
            stop.id.as_str(),
            stop.name,
            stop.position.x(),
            stop.position.y()
        );
    }
    out
}

pub fn nearest(found: &[StopDistance]) -> String {
    let mut out = String::new();
    for stop in found {
        let _ = writeln!(out, "{:<16} {:<28} {:>7.1}", stop.id, stop.name, stop.distance);
    }
    out
}

pub fn streets(available: &[StreetName], blocked: &BlockedStreetSet) -> String {
    let mut out = String::new();
    for street in available {
        let _ = writeln!(out, "  {}", street);
    }
    for street in blocked.iter() {
        let _ = writeln!(out, "x {}", street);
    }
    out
}

pub fn trip(trip: &TripEstimate) -> String {
    let mut out = String::new();
    let kind = if trip.is_alternative { "Alternative route" } else { "Direct route" };

    let _ = writeln!(out, "{}: {} → {}", kind, trip.origin.name, trip.destination.name);
    let _ = writeln!(out, "Distance: {} km", trip.distance_km);
    let _ = writeln!(out, "Streets: {}", join(&trip.streets));
    if !trip.blocked_streets_in_route.is_empty() {
        let _ = writeln!(out, "Blocked: {}", join(&trip.blocked_streets_in_route));
    }
    for line in &trip.breakdown {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

pub fn allocations(allocations: &[AllocationResult], stats: &FleetStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<48} {:>6} {:>6} {:>7} {:>8} {:>6}  {}",
        "route", "demand", "buses", "bus/h", "headway", "util%", "priority"
    );
    for a in allocations {
        let _ = writeln!(
            out,
            "{:<48} {:>6} {:>6} {:>7} {:>6} m {:>6.1}  {}",
            a.route.to_string(),
            a.route.frequency,
            a.assigned_buses,
            a.buses_per_hour,
            a.headway_minutes,
            a.utilization,
            a.route.priority
        );
    }
    let _ = writeln!(
        out,
        "Assigned {} of {} buses",
        stats.total_assigned_buses, stats.total_buses
    );
    out
}

pub fn statistics(stats: &FleetStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total buses:          {}", stats.total_buses);
    let _ = writeln!(out, "Assigned buses:       {}", stats.total_assigned_buses);
    let _ = writeln!(out, "Total demand:         {} passengers/h", stats.total_frequency);
    let _ = writeln!(out, "Average demand:       {} passengers/h", stats.average_frequency);
    let _ = writeln!(out, "High-demand routes:   {}", stats.high_demand_routes);
    let _ = writeln!(out, "Average utilization:  {:.1}%", stats.average_utilization);
    out
}

pub fn analysis(analysis: &RouteAnalysis) -> String {
    let a = &analysis.allocation;
    let mut out = String::new();
    let _ = writeln!(out, "Analysis: {}", a.route);
    let _ = writeln!(out, "  Assigned buses:   {}", a.assigned_buses);
    let _ = writeln!(out, "  Buses per hour:   {}", a.buses_per_hour);
    let _ = writeln!(out, "  Headway:          {} min", a.headway_minutes);
    let _ = writeln!(out, "  Daily trips:      {}", analysis.daily_trips);
    let _ = writeln!(out, "  Utilization:      {:.1}%", a.utilization);
    let _ = writeln!(out, "  Priority:         {}", a.route.priority);
    let _ = writeln!(out, "{}: {}", analysis.recommendation.category.title(), analysis.recommendation.message);
    out
}

pub fn timetable(route_key: &str, window: &ServiceWindow, departures: &[NaiveTime]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Departures for {}, {}-{} ({} trips)",
        route_key,
        window.start.format("%H:%M"),
        window.end().format("%H:%M"),
        departures.len()
    );
    for row in departures.chunks(8) {
        let line: Vec<String> = row.iter().map(|t| t.format("%H:%M").to_string()).collect();
        let _ = writeln!(out, "  {}", line.join("  "));
    }
    out
}

fn join(streets: &[StreetName]) -> String {
    streets.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
}

//! Summary figures over a fleet allocation.

use super::{allocation::AllocationResult, round_to_tenth};

/// Routes at or above this many passengers per hour count as high demand
pub const HIGH_DEMAND_THRESHOLD: u32 = 140;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetStatistics {
    pub total_buses: u32,
    pub total_assigned_buses: u32,
    /// Passengers per hour across all routes
    pub total_frequency: u64,
    pub average_frequency: u32,
    pub high_demand_routes: usize,
    /// Mean of per-route utilization, one decimal
    pub average_utilization: f64,
}

impl FleetStatistics {
    pub fn from_allocations(allocations: &[AllocationResult], total_buses: u32) -> Self {
        if allocations.is_empty() {
            return Self {
                total_buses,
                ..Self::default()
            };
        }

        let count = allocations.len() as f64;
        let total_frequency: u64 = allocations.iter().map(|a| u64::from(a.route.frequency)).sum();
        let utilization_sum: f64 = allocations.iter().map(|a| a.utilization).sum();

        Self {
            total_buses,
            total_assigned_buses: allocations.iter().map(|a| a.assigned_buses).sum(),
            total_frequency,
            // A mean of u32 values fits in u32
            average_frequency: (total_frequency as f64 / count).round() as u32,
            high_demand_routes: allocations
                .iter()
                .filter(|a| a.route.frequency >= HIGH_DEMAND_THRESHOLD)
                .count(),
            average_utilization: round_to_tenth(utilization_sum / count),
        }
    }
}

//! Threshold classifier turning a utilization figure into advice.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "kebab-case"))]
pub enum RecommendationCategory {
    ReassignMoreBuses,
    Maintain,
    OptimizeCapacity,
    ReassignBuses,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReassignMoreBuses => "reassign-more-buses",
            Self::Maintain => "maintain",
            Self::OptimizeCapacity => "optimize-capacity",
            Self::ReassignBuses => "reassign-buses",
        }
    }

    /// Short heading for display
    pub fn title(&self) -> &'static str {
        match self {
            Self::ReassignMoreBuses => "Reassign More Buses",
            Self::Maintain => "Maintain Assignment",
            Self::OptimizeCapacity => "Optimize Capacity",
            Self::ReassignBuses => "Reassign Buses",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub message: String,
}

/// Classify a utilization percentage. First matching threshold wins.
pub fn recommend(utilization: f64) -> Recommendation {
    let (category, message) = if utilization >= 90.0 {
        (
            RecommendationCategory::ReassignMoreBuses,
            format!(
                "Route overloaded ({:.1}% utilization). Reassign more buses from lower-demand routes.",
                utilization
            ),
        )
    } else if utilization >= 70.0 {
        (
            RecommendationCategory::Maintain,
            format!(
                "Route well optimized ({:.1}% utilization). Keep the current assignment.",
                utilization
            ),
        )
    } else if utilization >= 50.0 {
        (
            RecommendationCategory::OptimizeCapacity,
            format!(
                "Route has spare capacity ({:.1}% utilization). It can be optimized by reducing buses.",
                utilization
            ),
        )
    } else {
        (
            RecommendationCategory::ReassignBuses,
            format!(
                "Route underutilized ({:.1}% utilization). Consider reassigning buses to higher-demand routes.",
                utilization
            ),
        )
    };

    Recommendation { category, message }
}

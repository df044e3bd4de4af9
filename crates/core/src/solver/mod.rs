pub mod engine;

pub use engine::CostSearchEngine;

use crate::domain::FacilityId;
use serde::{Deserialize, Serialize};

/// Solver configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolverConfig {
    /// Transport cost per unit of distance travelled
    pub cost_per_distance_unit: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cost_per_distance_unit: 2,
        }
    }
}

/// Cheapest way found to fulfil an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Total round-trip cost of all visits
    pub cost: u64,

    /// Facilities in visiting order; empty for an empty order
    pub route: Vec<FacilityId>,
}

impl Plan {
    /// Plan for an order that needs no visits
    pub fn empty() -> Self {
        Self {
            cost: 0,
            route: Vec::new(),
        }
    }

    /// Number of facilities visited
    pub fn stops(&self) -> usize {
        self.route.len()
    }
}

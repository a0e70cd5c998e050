use serde::{Deserialize, Serialize};

use crate::physics::{calculate_thrust, cost_and_profit, estimate_mass, estimate_value};
use crate::types::{ResourceSnapshot, SimulationParameters};

/// Derived quantities for one refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationReport {
    pub name: String,
    pub id: String,
    /// Mean diameter used for the mass estimate (km)
    pub average_diameter: f64,
    /// kg
    pub estimated_mass: f64,
    /// km, copied from the snapshot
    pub miss_distance: f64,
    /// km/s, copied from the snapshot
    pub relative_velocity: f64,
    /// N
    pub required_thrust: f64,
    pub estimated_value: f64,
    pub cost: f64,
    pub profit: f64,
}

impl EstimationReport {
    /// Run the estimation chain over one snapshot.
    pub fn assemble(snapshot: &ResourceSnapshot, params: &SimulationParameters) -> Self {
        let average_diameter = snapshot.average_diameter();
        let estimated_mass = estimate_mass(average_diameter, params.density());
        let required_thrust =
            calculate_thrust(estimated_mass, params.target_delta_v(), params.burn_time());
        let estimated_value = estimate_value(estimated_mass, params.value_per_kg());
        let (cost, profit) = cost_and_profit(estimated_value);

        Self {
            name: snapshot.name.clone(),
            id: snapshot.id.clone(),
            average_diameter,
            estimated_mass,
            miss_distance: snapshot.miss_distance,
            relative_velocity: snapshot.relative_velocity,
            required_thrust,
            estimated_value,
            cost,
            profit,
        }
    }
}

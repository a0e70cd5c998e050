///! Shared prospecting data types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized view of a catalog record, taken from its first close approach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// Display name, e.g. "(2010 PK9)"
    pub name: String,
    /// Catalog identifier
    pub id: String,
    /// Lower bound of the estimated diameter (km)
    pub diameter_min: f64,
    /// Upper bound of the estimated diameter (km)
    pub diameter_max: f64,
    /// Miss distance of the close approach (km)
    pub miss_distance: f64,
    /// Velocity relative to Earth (km/s)
    pub relative_velocity: f64,
}

impl ResourceSnapshot {
    /// Mean of the diameter bounds (km)
    pub fn average_diameter(&self) -> f64 {
        (self.diameter_min + self.diameter_max) / 2.0
    }
}

/// Rejected simulation parameter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("burn time must be a positive number of seconds, got {0}")]
    InvalidBurnTime(f64),

    #[error("density must be a positive number of kg/m^3, got {0}")]
    InvalidDensity(f64),

    #[error("target delta-v must be finite, got {0}")]
    InvalidDeltaV(f64),

    #[error("value per kg must be finite, got {0}")]
    InvalidValuePerKg(f64),
}

/// Fixed inputs of the estimation chain.
///
/// Only constructible through [`SimulationParameters::new`], so a value of this
/// type always has a positive burn time and density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    target_delta_v: f64,
    burn_time: f64,
    density: f64,
    value_per_kg: f64,
}

impl SimulationParameters {
    /// # Arguments
    /// * `target_delta_v` - Velocity change to reach the target orbit (m/s)
    /// * `burn_time` - Duration of the burn (s), must be > 0
    /// * `density` - Bulk density of the body (kg/m^3), must be > 0
    /// * `value_per_kg` - Material value per kilogram (currency units)
    pub fn new(
        target_delta_v: f64,
        burn_time: f64,
        density: f64,
        value_per_kg: f64,
    ) -> Result<Self, ParameterError> {
        if !target_delta_v.is_finite() {
            return Err(ParameterError::InvalidDeltaV(target_delta_v));
        }
        if !(burn_time.is_finite() && burn_time > 0.0) {
            return Err(ParameterError::InvalidBurnTime(burn_time));
        }
        if !(density.is_finite() && density > 0.0) {
            return Err(ParameterError::InvalidDensity(density));
        }
        if !value_per_kg.is_finite() {
            return Err(ParameterError::InvalidValuePerKg(value_per_kg));
        }

        Ok(Self {
            target_delta_v,
            burn_time,
            density,
            value_per_kg,
        })
    }

    pub fn target_delta_v(&self) -> f64 {
        self.target_delta_v
    }

    pub fn burn_time(&self) -> f64 {
        self.burn_time
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn value_per_kg(&self) -> f64 {
        self.value_per_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_diameter() {
        let snapshot = ResourceSnapshot {
            name: "(2010 PK9)".to_string(),
            id: "3542519".to_string(),
            diameter_min: 0.3,
            diameter_max: 0.7,
            miss_distance: 1_000_000.0,
            relative_velocity: 12.5,
        };
        assert!((snapshot.average_diameter() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_parameters_accept_valid_values() {
        let params = SimulationParameters::new(3000.0, 3600.0, 3500.0, 45000.0).unwrap();
        assert_eq!(params.target_delta_v(), 3000.0);
        assert_eq!(params.burn_time(), 3600.0);
        assert_eq!(params.density(), 3500.0);
        assert_eq!(params.value_per_kg(), 45000.0);
    }

    #[test]
    fn test_parameters_reject_non_positive_burn_time() {
        assert_eq!(
            SimulationParameters::new(3000.0, 0.0, 3500.0, 45000.0),
            Err(ParameterError::InvalidBurnTime(0.0))
        );
        assert_eq!(
            SimulationParameters::new(3000.0, -1.0, 3500.0, 45000.0),
            Err(ParameterError::InvalidBurnTime(-1.0))
        );
        assert!(SimulationParameters::new(3000.0, f64::NAN, 3500.0, 45000.0).is_err());
    }

    #[test]
    fn test_parameters_reject_non_positive_density() {
        assert_eq!(
            SimulationParameters::new(3000.0, 3600.0, 0.0, 45000.0),
            Err(ParameterError::InvalidDensity(0.0))
        );
        assert!(SimulationParameters::new(3000.0, 3600.0, f64::INFINITY, 45000.0).is_err());
    }

    #[test]
    fn test_parameters_reject_non_finite_delta_v_and_value() {
        assert!(SimulationParameters::new(f64::NAN, 3600.0, 3500.0, 45000.0).is_err());
        assert!(SimulationParameters::new(3000.0, 3600.0, 3500.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_negative_value_per_kg_is_allowed() {
        // Only non-finite values are rejected; sign is the caller's business.
        assert!(SimulationParameters::new(3000.0, 3600.0, 3500.0, -1.0).is_ok());
    }
}

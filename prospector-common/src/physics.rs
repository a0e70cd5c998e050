///! Physical and economic estimates
///!
///! Diameters are given in kilometers, as the catalog reports them, and
///! converted to meters before the volume is computed. With density in
///! kg/m^3 this yields mass in kilograms.
///!
///! Bodies are approximated as spheres. No input is clamped: a non-positive
///! diameter gives a non-positive mass, which flows on into thrust and value.

use std::f64::consts::PI;

pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Share of the estimated value consumed by extraction cost
pub const COST_FRACTION: f64 = 0.6;

/// Mass (kg) of a sphere of the given diameter (km) and density (kg/m^3).
pub fn estimate_mass(diameter_km: f64, density: f64) -> f64 {
    let radius_m = diameter_km * METERS_PER_KILOMETER / 2.0;
    let volume = (4.0 / 3.0) * PI * radius_m.powi(3);
    volume * density
}

/// Thrust (N) needed to change `mass` by `target_delta_v` (m/s) over `burn_time` (s).
///
/// `burn_time` must be positive; [`crate::SimulationParameters`] guarantees it.
pub fn calculate_thrust(mass: f64, target_delta_v: f64, burn_time: f64) -> f64 {
    mass * target_delta_v / burn_time
}

pub fn estimate_value(mass: f64, value_per_kg: f64) -> f64 {
    mass * value_per_kg
}

/// Split a value into `(cost, profit)`.
pub fn cost_and_profit(value: f64) -> (f64, f64) {
    let cost = value * COST_FRACTION;
    (cost, value - cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_estimate_mass_known_value() {
        // r = 250 m, V = 4/3 * pi * 250^3
        let expected = (4.0 / 3.0) * PI * 250.0_f64.powi(3) * 3500.0;
        assert!(close(estimate_mass(0.5, 3500.0), expected));
        assert!(close(estimate_mass(0.5, 3500.0), 2.290_744_643_242_55e11));
    }

    #[test]
    fn test_estimate_mass_increasing_in_diameter_and_density() {
        let diameters = [0.001, 0.01, 0.1, 0.3, 0.5, 0.7, 1.0, 5.0];
        for pair in diameters.windows(2) {
            assert!(estimate_mass(pair[0], 3500.0) < estimate_mass(pair[1], 3500.0));
        }

        let densities = [1.0, 1000.0, 2000.0, 3500.0, 8000.0];
        for pair in densities.windows(2) {
            assert!(estimate_mass(0.5, pair[0]) < estimate_mass(0.5, pair[1]));
        }
    }

    #[test]
    fn test_estimate_mass_degenerate_diameter() {
        assert_eq!(estimate_mass(0.0, 3500.0), 0.0);
        assert!(estimate_mass(-0.5, 3500.0) < 0.0);
    }

    #[test]
    fn test_calculate_thrust_formula() {
        let mass = 2.29e11;
        assert!(close(calculate_thrust(mass, 3000.0, 3600.0), mass * 3000.0 / 3600.0));
    }

    #[test]
    fn test_calculate_thrust_scaling() {
        let base = calculate_thrust(1.0e6, 3000.0, 3600.0);
        assert!(close(calculate_thrust(2.0e6, 3000.0, 3600.0), 2.0 * base));
        assert!(close(calculate_thrust(1.0e6, 6000.0, 3600.0), 2.0 * base));
        assert!(close(calculate_thrust(1.0e6, 3000.0, 7200.0), base / 2.0));
    }

    #[test]
    fn test_estimate_value_propagates_sign() {
        assert_eq!(estimate_value(10.0, 45000.0), 450_000.0);
        assert_eq!(estimate_value(-10.0, 45000.0), -450_000.0);
    }

    #[test]
    fn test_cost_and_profit_sum_to_value() {
        for value in [1.0, 450_000.0, 1.030_835_089_459_15e16, 0.1, 7.77e-3] {
            let (cost, profit) = cost_and_profit(value);
            assert_eq!(cost + profit, value);
            assert!(close(cost, 0.6 * value));
            assert!(close(profit, 0.4 * value));
        }
    }
}

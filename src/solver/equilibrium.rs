//! Current-balance equilibrium and switching-threshold solves.

use crate::device::DeviceParameters;

use super::{newton, SolverOptions};

/// How a solve arrived at its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The Newton iteration converged within tolerance.
    Converged,
    /// The solve failed and the documented fallback estimate was used.
    Fallback,
}

/// Result of an equilibrium or fixed-point solve.
///
/// A solve never fails outright: the value is always usable, and the tag
/// records whether it came from the iteration or from the fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// The solved (or fallback) voltage.
    pub value: f64,
    /// Whether the solver converged or fell back.
    pub convergence: Convergence,
}

impl Solution {
    /// True if the Newton iteration converged.
    pub fn converged(&self) -> bool {
        self.convergence == Convergence::Converged
    }
}

/// Solve for the output voltage at which the pull-down and pull-up currents
/// balance, for the given input voltage.
///
/// The initial guess reflects the expected inverting behavior: an input
/// below `vdd/2` should produce a high output, so the solve is seeded at
/// `0.9 * vdd`, and at `0.1 * vdd` otherwise. The result is clamped to
/// `[0, vdd]`.
///
/// On failure the ideal linear inverter `vout = vdd - vin` is used and the
/// result is tagged [`Convergence::Fallback`]; this function is total.
pub fn solve_vout(params: &DeviceParameters, vin: f64, options: &SolverOptions) -> Solution {
    let vdd = params.vdd;
    let balance = |vout: f64| {
        params.nmos_current(vin, vout) - params.pmos_current(vdd - vin, vdd - vout)
    };

    let guess = if vin < vdd / 2.0 { 0.9 * vdd } else { 0.1 * vdd };

    match newton::find_root(balance, 0.0, vdd, guess, options) {
        Some(vout) if vout.is_finite() => Solution {
            value: vout.clamp(0.0, vdd),
            convergence: Convergence::Converged,
        },
        _ => Solution {
            value: (vdd - vin).clamp(0.0, vdd),
            convergence: Convergence::Fallback,
        },
    }
}

/// Solve for the switching threshold `Vm`, the fixed point where the output
/// voltage equals the input voltage.
///
/// Seeded at `vdd/2`; falls back to `vdd/2` when the fixed-point search
/// fails, with the same total-function guarantee as [`solve_vout`].
pub fn solve_vm(params: &DeviceParameters, options: &SolverOptions) -> Solution {
    let residual = |vin: f64| solve_vout(params, vin, options).value - vin;
    let seed = params.vdd / 2.0;

    match newton::find_root(residual, 0.0, params.vdd, seed, options) {
        Some(vm) if vm.is_finite() => Solution {
            value: vm.clamp(0.0, params.vdd),
            convergence: Convergence::Converged,
        },
        _ => Solution {
            value: seed,
            convergence: Convergence::Fallback,
        },
    }
}

/// Static supply current drawn at the DC operating point for `vin`.
///
/// This is the pull-down current at the solved output voltage; it peaks
/// around the switching threshold where both devices conduct and vanishes
/// at the rails.
pub fn supply_current(params: &DeviceParameters, vin: f64, options: &SolverOptions) -> f64 {
    let vout = solve_vout(params, vin, options).value;
    params.nmos_current(vin, vout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_inverting_endpoints() {
        let params = DeviceParameters::default();
        let options = SolverOptions::default();

        // Grounded input: output pulled to the rail
        let high = solve_vout(&params, 0.0, &options);
        assert_abs_diff_eq!(high.value, 5.0, epsilon = 0.05);

        // Input at the rail: output pulled to ground
        let low = solve_vout(&params, 5.0, &options);
        assert_abs_diff_eq!(low.value, 0.0, epsilon = 0.05);
    }

    #[test]
    fn test_output_clamped_to_rails() {
        let params = DeviceParameters::default();
        let options = SolverOptions::default();

        let n = 21;
        for i in 0..n {
            let vin = params.vdd * i as f64 / (n - 1) as f64;
            let sol = solve_vout(&params, vin, &options);
            assert!(sol.value >= 0.0 && sol.value <= params.vdd, "vin={vin}");
        }
    }

    #[test]
    fn test_vtc_is_inverting_across_midpoint() {
        let params = DeviceParameters::default();
        let options = SolverOptions::default();

        let low_side = solve_vout(&params, 1.0, &options).value;
        let high_side = solve_vout(&params, 4.0, &options).value;
        assert!(low_side > high_side);
        assert!(low_side > 4.0);
        assert!(high_side < 1.0);
    }

    #[test]
    fn test_switching_threshold_near_midpoint() {
        let params = DeviceParameters::default();
        let options = SolverOptions::default();

        let vm = solve_vm(&params, &options);
        assert_abs_diff_eq!(vm.value, 2.5, epsilon = 0.3);
        assert!(vm.converged());

        // The stronger pull-down shifts the threshold below midrail
        assert!(vm.value < 2.5);
    }

    #[test]
    fn test_matched_betas_center_the_threshold() {
        // Symmetric devices put Vm exactly at vdd/2
        let params = DeviceParameters::new(5.0, 1.0, -1.0, 100e-6, 100e-6).unwrap();
        let options = SolverOptions::default();

        let vm = solve_vm(&params, &options);
        assert_abs_diff_eq!(vm.value, 2.5, epsilon = 0.05);
    }

    #[test]
    fn test_supply_current_peaks_between_the_rails() {
        let params = DeviceParameters::default();
        let options = SolverOptions::default();

        // No conduction path at either rail
        assert_eq!(supply_current(&params, 0.0, &options), 0.0);
        assert!(supply_current(&params, 5.0, &options) < 1e-9);

        // Both devices conduct near the threshold
        let mid = supply_current(&params, 2.0, &options);
        assert!(mid > 1e-6);
    }

    #[test]
    fn test_starved_iteration_falls_back() {
        let params = DeviceParameters::default();
        // Zero iterations can never converge
        let options = SolverOptions::new().with_max_iterations(0);

        let sol = solve_vout(&params, 2.0, &options);
        assert_eq!(sol.convergence, Convergence::Fallback);
        assert_abs_diff_eq!(sol.value, 3.0, epsilon = 1e-12);

        let vm = solve_vm(&params, &options);
        assert_eq!(vm.convergence, Convergence::Fallback);
        assert_abs_diff_eq!(vm.value, 2.5, epsilon = 1e-12);
    }
}

//! Switching threshold and noise-margin extraction.
//!
//! The output and input logic levels use simplified fixed-fraction formulas
//! rather than the unity-gain tangent definitions from rigorous inverter
//! analysis:
//!
//! ```text
//! VOL = 0.1 * Vdd      VOH = 0.9 * Vdd
//! VIL = Vtn            VIH = Vdd + Vtp
//! NML = VIL - VOL      NMH = VOH - VIH
//! ```
//!
//! These are deliberate placeholders; downstream reference numbers were
//! generated against them, so they must not be "corrected".

use crate::device::DeviceParameters;
use crate::solver::{self, Convergence, SolverOptions};

/// Derived critical voltages and noise margins for one parameter set.
///
/// Always a pure function of the current parameters; recompute after any
/// parameter change rather than caching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPoints {
    /// Switching threshold: input voltage where output equals input
    pub vm: f64,
    /// Output-low level
    pub vol: f64,
    /// Output-high level
    pub voh: f64,
    /// Input-low level
    pub vil: f64,
    /// Input-high level
    pub vih: f64,
    /// Low noise margin, `vil - vol`
    pub nml: f64,
    /// High noise margin, `voh - vih`
    pub nmh: f64,
    /// Whether the `vm` solve converged or used its fallback
    pub convergence: Convergence,
}

impl CriticalPoints {
    /// Nominal-default critical points used when the threshold solve cannot
    /// be trusted: `vm` at midrail and 0.4 V margins.
    pub fn fallback(params: &DeviceParameters) -> Self {
        let vdd = params.vdd;
        Self {
            vm: vdd / 2.0,
            vol: 0.1 * vdd,
            voh: 0.9 * vdd,
            vil: params.vtn,
            vih: vdd + params.vtp,
            nml: 0.4,
            nmh: 0.4,
            convergence: Convergence::Fallback,
        }
    }
}

/// Compute critical points with default solver options.
pub fn compute_critical_points(params: &DeviceParameters) -> CriticalPoints {
    compute_critical_points_with(params, &SolverOptions::default())
}

/// Compute critical points with explicit solver limits.
///
/// Never fails: if the threshold solve does not converge, the switching
/// threshold degrades to `vdd/2` and the noise margins to the nominal 0.4 V
/// defaults, keeping sweeps and Monte Carlo batches running.
pub fn compute_critical_points_with(
    params: &DeviceParameters,
    options: &SolverOptions,
) -> CriticalPoints {
    let vdd = params.vdd;
    let vol = 0.1 * vdd;
    let voh = 0.9 * vdd;
    let vil = params.vtn;
    let vih = vdd + params.vtp;

    let vm = solver::solve_vm(params, options);
    match vm.convergence {
        Convergence::Converged => CriticalPoints {
            vm: vm.value,
            vol,
            voh,
            vil,
            vih,
            nml: vil - vol,
            nmh: voh - vih,
            convergence: Convergence::Converged,
        },
        Convergence::Fallback => CriticalPoints::fallback(params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_margin_identities() {
        let params = DeviceParameters::default();
        let cp = compute_critical_points(&params);

        assert_eq!(cp.nml, cp.vil - cp.vol);
        assert_eq!(cp.nmh, cp.voh - cp.vih);
        assert_abs_diff_eq!(cp.vol, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.voh, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.vil, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.vih, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_threshold_inside_rails() {
        let params = DeviceParameters::default();
        let cp = compute_critical_points(&params);

        assert!(cp.vm > 0.0 && cp.vm < params.vdd);
        assert_abs_diff_eq!(cp.vm, 2.5, epsilon = 0.3);
        assert_eq!(cp.convergence, Convergence::Converged);
    }

    #[test]
    fn test_levels_scale_with_supply() {
        let params = DeviceParameters::new(3.3, 0.7, -0.7, 100e-6, 50e-6).unwrap();
        let cp = compute_critical_points(&params);

        assert_abs_diff_eq!(cp.vol, 0.33, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.voh, 2.97, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.vil, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.vih, 2.6, epsilon = 1e-9);
        assert!(cp.vm > 0.0 && cp.vm < 3.3);
    }

    #[test]
    fn test_fallback_defaults() {
        let params = DeviceParameters::default();
        let options = SolverOptions::new().with_max_iterations(0);
        let cp = compute_critical_points_with(&params, &options);

        assert_eq!(cp.convergence, Convergence::Fallback);
        assert_abs_diff_eq!(cp.vm, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.nml, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(cp.nmh, 0.4, epsilon = 1e-12);
    }
}

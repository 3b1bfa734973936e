//! Voltage transfer characteristic generation.

use crate::device::DeviceParameters;
use crate::solver::{self, Convergence, SolverOptions};

/// One point on the transfer curve: an equilibrium solve at a fixed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Input voltage (V)
    pub vin: f64,
    /// Output voltage balancing the device currents, clamped to `[0, vdd]`
    pub vout: f64,
    /// Whether the balance solve converged or fell back to `vdd - vin`
    pub convergence: Convergence,
}

/// Ordered transfer curve sampled over `vin` in `[0, vdd]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VtcCurve {
    pub points: Vec<OperatingPoint>,
}

impl VtcCurve {
    /// Number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the curve holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points whose solve converged.
    pub fn converged_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.convergence == Convergence::Converged)
            .count()
    }
}

/// Generate the transfer curve with default solver options.
pub fn generate_vtc(params: &DeviceParameters, n_points: usize) -> VtcCurve {
    generate_vtc_with(params, n_points, &SolverOptions::default())
}

/// Generate the transfer curve with explicit solver limits.
///
/// Samples `n_points` evenly spaced inputs over `[0, vdd]` inclusive, one
/// equilibrium solve per sample. The curve is regenerated on request and
/// never cached across parameter changes. The qualitative shape is monotonic
/// non-increasing, but this is not enforced.
pub fn generate_vtc_with(
    params: &DeviceParameters,
    n_points: usize,
    options: &SolverOptions,
) -> VtcCurve {
    let points = linspace(0.0, params.vdd, n_points)
        .map(|vin| {
            let sol = solver::solve_vout(params, vin, options);
            OperatingPoint {
                vin,
                vout: sol.value,
                convergence: sol.convergence,
            }
        })
        .collect();
    VtcCurve { points }
}

/// Evenly spaced samples over `[start, end]`, endpoints included.
fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| {
        if i + 1 == n && n > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

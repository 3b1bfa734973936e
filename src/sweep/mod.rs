//! Parameter sweeps and process-variation analysis.
//!
//! Both engines re-run the static characterization under perturbed
//! parameters. Perturbation never mutates the caller's
//! [`DeviceParameters`]: each point gets its own validated copy, so the
//! original record is observably unchanged after any sweep.

mod monte_carlo;

pub use monte_carlo::{
    monte_carlo, monte_carlo_with_source, GaussianSource, Lcg64, MonteCarloConfig, MonteCarloRun,
    SummaryStat, VariationSample, VariationSummary,
};

use crate::analysis::{self, CriticalPoints, VtcCurve};
use crate::device::DeviceParameters;
use crate::error::{InverterError, Result};
use crate::solver::SolverOptions;

/// A sweepable device parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepField {
    Vdd,
    Vtn,
    Vtp,
    BetaN,
    BetaP,
    Cl,
    Wn,
    Wp,
    L,
}

impl SweepField {
    /// Parameter name as it appears in error messages and reports.
    pub fn name(&self) -> &'static str {
        match self {
            SweepField::Vdd => "vdd",
            SweepField::Vtn => "vtn",
            SweepField::Vtp => "vtp",
            SweepField::BetaN => "beta_n",
            SweepField::BetaP => "beta_p",
            SweepField::Cl => "cl",
            SweepField::Wn => "w_n",
            SweepField::Wp => "w_p",
            SweepField::L => "l",
        }
    }
}

impl DeviceParameters {
    /// Build a validated copy with one field replaced.
    pub fn with_field(&self, field: SweepField, value: f64) -> Result<Self> {
        let mut p = *self;
        match field {
            SweepField::Vdd => p.vdd = value,
            SweepField::Vtn => p.vtn = value,
            SweepField::Vtp => p.vtp = value,
            SweepField::BetaN => p.beta_n = value,
            SweepField::BetaP => p.beta_p = value,
            SweepField::Cl => p.cl = value,
            SweepField::Wn => p.w_n = value,
            SweepField::Wp => p.w_p = value,
            SweepField::L => p.l = value,
        }
        p.validated()
    }
}

/// Characterization of one sweep point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepEntry {
    /// The swept field's value at this point
    pub value: f64,
    /// Critical points for the modified parameters
    pub critical_points: CriticalPoints,
    /// Transfer curve for the modified parameters
    pub vtc: VtcCurve,
}

/// Sweep one parameter across `values`, recomputing the critical points and
/// the transfer curve at each point.
///
/// Each point characterizes a modified *copy* of `params`; the caller's
/// record is never touched. A value that violates the parameter invariants
/// (for example a non-positive supply) surfaces as
/// [`InverterError::InvalidParameter`].
pub fn sweep(
    params: &DeviceParameters,
    field: SweepField,
    values: &[f64],
    n_points: usize,
    options: &SolverOptions,
) -> Result<Vec<SweepEntry>> {
    if values.is_empty() {
        return Err(InverterError::EmptySweep {
            field: field.name(),
        });
    }

    values
        .iter()
        .map(|&value| {
            let modified = params.with_field(field, value)?;
            Ok(SweepEntry {
                value,
                critical_points: analysis::compute_critical_points_with(&modified, options),
                vtc: analysis::generate_vtc_with(&modified, n_points, options),
            })
        })
        .collect()
}

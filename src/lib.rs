//! # Inverter Core
//!
//! A characterization engine for two-transistor CMOS logic inverters.
//!
//! This library provides:
//! - A square-law drain-current model for the pull-down (NMOS) and pull-up
//!   (PMOS) devices
//! - A nonlinear equilibrium solver that derives the output voltage and
//!   switching threshold from current balance
//! - Voltage transfer characteristic (VTC) and noise-margin extraction
//! - A smoothed step-response approximation for transient behavior
//! - A static + dynamic power model across a frequency sweep
//! - Deterministic parameter sweeps and seeded Monte Carlo process-variation
//!   analysis
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`device`] - Device parameters and the piecewise drain-current model
//! - [`solver`] - Newton-Raphson root finding and the current-balance solver
//! - [`analysis`] - Critical points, VTC, transient, and power analyses
//! - [`sweep`] - Parameter sweeps and Monte Carlo variation
//! - [`report`] - Text summary formatting (CLI only)
//!
//! ## Usage
//!
//! ```
//! use inverter_core::{analysis, DeviceParameters};
//!
//! let params = DeviceParameters::default();
//! let cp = analysis::compute_critical_points(&params);
//! assert!(cp.vm > 0.0 && cp.vm < params.vdd);
//! ```
//!
//! ## Characterization Method
//!
//! For a given input voltage the output voltage is the root of the current
//! balance `I_nmos(Vin, Vout) = I_pmos(Vdd - Vin, Vdd - Vout)`, found by
//! Newton-Raphson iteration with a heuristic initial guess. Solves that fail
//! to converge fall back to the ideal linear inverter `Vout = Vdd - Vin` and
//! are tagged as such, so a single unstable point never aborts a sweep or a
//! Monte Carlo batch.
//!
//! The transient response is a documented heuristic: a piecewise-constant
//! switching trace smoothed by a zero-phase third-order low-pass filter whose
//! cutoff is derived from an RC time-constant estimate, not a solution of the
//! governing differential equation.

pub mod analysis;
pub mod device;
pub mod error;
pub mod solver;
pub mod sweep;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use device::DeviceParameters;
pub use error::{InverterError, Result};
pub use solver::{Convergence, Solution, SolverOptions};

/// Default number of VTC sample points.
pub const DEFAULT_VTC_POINTS: usize = 200;

/// Switching activity factor used by the dynamic power model.
pub const ACTIVITY_FACTOR: f64 = 0.5;

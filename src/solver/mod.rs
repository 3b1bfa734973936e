//! Nonlinear equilibrium solving.
//!
//! This module provides the numerical engine behind the static
//! characterization: a bounded scalar Newton-Raphson root finder and the
//! current-balance solver built on top of it.
//!
//! ## Current balance
//!
//! At a DC operating point the pull-down and pull-up currents must match:
//!
//! ```text
//! f(Vout) = I_nmos(Vin, Vout) - I_pmos(Vdd - Vin, Vdd - Vout) = 0
//! ```
//!
//! [`equilibrium::solve_vout`] finds the root of `f`, and
//! [`equilibrium::solve_vm`] finds the fixed point where the output equals
//! the input (the switching threshold).
//!
//! ## Failure policy
//!
//! Solves are bounded by [`SolverOptions::max_iterations`]. A solve that
//! exceeds the cap or produces a non-finite value falls back to a documented
//! estimate and tags the result [`Convergence::Fallback`], so callers and
//! tests can distinguish a converged point from a degraded one without the
//! solve ever raising.

mod equilibrium;
mod newton;

pub use equilibrium::{solve_vm, solve_vout, supply_current, Convergence, Solution};
pub use newton::find_root;

/// Convergence tolerance for Newton-Raphson iteration.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-9;

/// Maximum Newton-Raphson iterations per solve.
pub const MAX_ITERATIONS: usize = 100;

/// Relative step used for the finite-difference derivative.
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// Iteration and tolerance limits for the equilibrium solver.
///
/// Exposed so callers can bound worst-case latency per solve.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// Maximum Newton-Raphson iterations before falling back.
    pub max_iterations: usize,
    /// Convergence tolerance on the step size.
    pub tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: CONVERGENCE_TOLERANCE,
        }
    }
}

impl SolverOptions {
    /// Create options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

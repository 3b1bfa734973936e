//! Error types for the inverter characterization engine.
//!
//! This module provides a unified error type [`InverterError`] covering
//! parameter validation and sweep setup. Solver non-convergence is
//! deliberately *not* an error: the equilibrium solver recovers locally with
//! a documented fallback value and reports it through
//! [`crate::solver::Convergence`], so characterization routines stay total
//! over valid parameters.

use thiserror::Error;

/// Result type alias using [`InverterError`].
pub type Result<T> = std::result::Result<T, InverterError>;

/// Unified error type for all inverter-core operations.
#[derive(Error, Debug)]
pub enum InverterError {
    /// A device parameter failed validation at construction time.
    #[error("Invalid parameter '{param}': {message} (value: {value:.4e})")]
    InvalidParameter {
        param: &'static str,
        value: f64,
        message: &'static str,
    },

    /// A sweep was requested over an empty value list.
    #[error("Sweep over '{field}' requires at least one value")]
    EmptySweep { field: &'static str },
}

impl InverterError {
    /// Create an invalid-parameter error.
    pub fn invalid_parameter(param: &'static str, value: f64, message: &'static str) -> Self {
        Self::InvalidParameter {
            param,
            value,
            message,
        }
    }
}

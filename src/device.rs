//! Device parameters and the square-law drain-current model.
//!
//! Both transistors use the classical long-channel square-law model with
//! three operating regions:
//!
//! - Cutoff:     `I = 0`                                  when overdrive <= 0
//! - Saturation: `I = 0.5 * beta * Vov^2`                 when Vds >= Vov
//! - Triode:     `I = beta * (Vov * Vds - 0.5 * Vds^2)`   otherwise
//!
//! where `Vov` is the gate overdrive (`Vgs - Vtn` for the pull-down device,
//! `Vsg - |Vtp|` for the pull-up). The pull-up device is evaluated in the
//! complementary convention: callers pass `Vsg = Vdd - Vin` and
//! `Vsd = Vdd - Vout`.
//!
//! There is no subthreshold conduction, channel-length modulation, or
//! temperature dependence in this model.

use crate::error::{InverterError, Result};

/// Technology and load parameters for one inverter instance.
///
/// The record is an immutable value: sweeps and Monte Carlo runs build
/// modified copies via [`DeviceParameters::with_field`] rather than mutating
/// shared state, so callers never observe a half-updated parameter set.
///
/// Invariants (enforced by [`DeviceParameters::validated`]): `vdd`, `beta_n`,
/// `beta_p`, `cl`, `w_n`, `w_p`, and `l` are strictly positive, `vtn > 0`,
/// and `vtp < 0` (negative convention for the PMOS threshold).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceParameters {
    /// Supply voltage (V)
    pub vdd: f64,
    /// NMOS threshold voltage (V), positive
    pub vtn: f64,
    /// PMOS threshold voltage (V), negative convention
    pub vtp: f64,
    /// NMOS transconductance parameter (A/V^2)
    pub beta_n: f64,
    /// PMOS transconductance parameter (A/V^2)
    pub beta_p: f64,
    /// Load capacitance (F)
    pub cl: f64,
    /// NMOS channel width (m)
    pub w_n: f64,
    /// PMOS channel width (m)
    pub w_p: f64,
    /// Channel length (m)
    pub l: f64,
}

impl Default for DeviceParameters {
    /// Nominal 5V technology parameters.
    fn default() -> Self {
        Self {
            vdd: 5.0,
            vtn: 1.0,
            vtp: -1.0,
            beta_n: 100e-6,
            beta_p: 50e-6,
            cl: 10e-12,
            w_n: 2e-6,
            w_p: 4e-6,
            l: 1e-6,
        }
    }
}

impl DeviceParameters {
    /// Create a validated parameter set from the electrical parameters,
    /// keeping the default geometry and load.
    pub fn new(vdd: f64, vtn: f64, vtp: f64, beta_n: f64, beta_p: f64) -> Result<Self> {
        Self {
            vdd,
            vtn,
            vtp,
            beta_n,
            beta_p,
            ..Self::default()
        }
        .validated()
    }

    /// Validate the invariants, consuming and returning the record.
    ///
    /// All derived computations assume parameters have passed through here.
    pub fn validated(self) -> Result<Self> {
        let positive: [(&'static str, f64); 7] = [
            ("vdd", self.vdd),
            ("beta_n", self.beta_n),
            ("beta_p", self.beta_p),
            ("cl", self.cl),
            ("w_n", self.w_n),
            ("w_p", self.w_p),
            ("l", self.l),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(InverterError::invalid_parameter(
                    name,
                    value,
                    "must be strictly positive",
                ));
            }
        }
        if !(self.vtn > 0.0) || !self.vtn.is_finite() {
            return Err(InverterError::invalid_parameter(
                "vtn",
                self.vtn,
                "NMOS threshold must be strictly positive",
            ));
        }
        if !(self.vtp < 0.0) || !self.vtp.is_finite() {
            return Err(InverterError::invalid_parameter(
                "vtp",
                self.vtp,
                "PMOS threshold uses the negative convention",
            ));
        }
        Ok(self)
    }

    /// NMOS (pull-down) drain current for the given terminal voltages.
    ///
    /// Pure and total: defined for all finite inputs, never negative.
    pub fn nmos_current(&self, vgs: f64, vds: f64) -> f64 {
        square_law(vgs - self.vtn, vds, self.beta_n)
    }

    /// PMOS (pull-up) drain current in source-referenced convention.
    ///
    /// Callers pass `vsg = vdd - vin` and `vsd = vdd - vout`.
    pub fn pmos_current(&self, vsg: f64, vsd: f64) -> f64 {
        square_law(vsg - self.vtp.abs(), vsd, self.beta_p)
    }
}

/// Piecewise square-law current for one device, in terms of gate overdrive.
fn square_law(vov: f64, vds: f64, beta: f64) -> f64 {
    if vov <= 0.0 || vds <= 0.0 {
        // Cutoff, or no drain-source drop to conduct across
        0.0
    } else if vds >= vov {
        // Saturation
        0.5 * beta * vov * vov
    } else {
        // Triode (linear) region
        beta * (vov * vds - 0.5 * vds * vds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nmos_regions() {
        let p = DeviceParameters::default();

        // Cutoff below threshold
        assert_eq!(p.nmos_current(0.5, 2.0), 0.0);
        assert_eq!(p.nmos_current(1.0, 2.0), 0.0);

        // Saturation: vds >= overdrive
        let i_sat = p.nmos_current(3.0, 4.0);
        assert_relative_eq!(i_sat, 0.5 * 100e-6 * 4.0, max_relative = 1e-12);

        // Triode: vds < overdrive
        let i_tri = p.nmos_current(3.0, 1.0);
        assert_relative_eq!(i_tri, 100e-6 * (2.0 * 1.0 - 0.5), max_relative = 1e-12);

        // Triode current is below the saturation plateau
        assert!(i_tri < i_sat);
    }

    #[test]
    fn test_pmos_mirrors_nmos_shape() {
        let p = DeviceParameters::default();

        assert_eq!(p.pmos_current(0.8, 2.0), 0.0);

        let i_sat = p.pmos_current(3.0, 4.0);
        assert_relative_eq!(i_sat, 0.5 * 50e-6 * 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_current_never_negative() {
        let p = DeviceParameters::default();
        for vgs in [-1.0, 0.0, 1.5, 3.0, 5.0] {
            for vds in [-1.0, 0.0, 0.5, 2.5, 5.0] {
                assert!(p.nmos_current(vgs, vds) >= 0.0);
                assert!(p.pmos_current(vgs, vds) >= 0.0);
            }
        }
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        assert!(DeviceParameters::new(0.0, 1.0, -1.0, 100e-6, 50e-6).is_err());
        assert!(DeviceParameters::new(5.0, -1.0, -1.0, 100e-6, 50e-6).is_err());
        assert!(DeviceParameters::new(5.0, 1.0, 1.0, 100e-6, 50e-6).is_err());
        assert!(DeviceParameters::new(5.0, 1.0, -1.0, 0.0, 50e-6).is_err());
        assert!(DeviceParameters::new(5.0, 1.0, -1.0, 100e-6, -50e-6).is_err());

        let bad_cl = DeviceParameters {
            cl: 0.0,
            ..DeviceParameters::default()
        };
        assert!(bad_cl.validated().is_err());

        assert!(DeviceParameters::default().validated().is_ok());
    }
}

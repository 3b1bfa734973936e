//! Approximate transient step response.
//!
//! This is a documented heuristic, not an integration of the governing
//! differential equation. The output trace is built in three steps:
//!
//! 1. An ideal square-wave input (low for the first half-period, high for
//!    the second) drives a piecewise-constant "ideal switching" output that
//!    jumps instantaneously at each input transition.
//! 2. A first-order propagation-delay estimate sets the RC time constant:
//!    `tau = 2.2 * (W_n / L) * CL / beta_n`.
//! 3. The ideal trace is smoothed by a third-order Butterworth low-pass
//!    applied forward and backward (zero phase), with the normalized cutoff
//!    derived from `tau` and clamped to a stable range.
//!
//! The supplied `rise_time` / `fall_time` are echoed back as the reported
//! propagation delays; they label the trace and are not measured from it.
//! Asymmetric rise/fall behavior is not modeled.

use std::f64::consts::PI;

use crate::device::DeviceParameters;

/// Lowest normalized cutoff accepted by the smoothing filter.
///
/// Below this the bilinear-transformed coefficients lose precision and the
/// filter rings across the whole trace.
const MIN_CUTOFF: f64 = 1e-4;

/// Highest normalized cutoff, kept away from the Nyquist pole of the
/// prewarping tangent.
const MAX_CUTOFF: f64 = 0.99;

/// One sample of the transient trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientSample {
    /// Time (s)
    pub t: f64,
    /// Square-wave input voltage (V)
    pub vin: f64,
    /// Smoothed output voltage (V)
    pub vout: f64,
}

/// Smoothed step-response trace over one input period.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientTrace {
    pub samples: Vec<TransientSample>,
    /// RC time constant used to set the filter cutoff (s)
    pub tau: f64,
    /// Reported low-to-high propagation delay; echoes the supplied rise time
    pub tp_lh: f64,
    /// Reported high-to-low propagation delay; echoes the supplied fall time
    pub tp_hl: f64,
}

impl TransientTrace {
    /// Average reported propagation delay.
    pub fn tp_avg(&self) -> f64 {
        0.5 * (self.tp_lh + self.tp_hl)
    }
}

/// Simulate one period of the step response.
///
/// The input steps from `0` to `vdd` at `period / 2`. Independent of the
/// equilibrium solver; only device geometry, load, and `beta_n` matter.
pub fn simulate_transient(
    params: &DeviceParameters,
    rise_time: f64,
    fall_time: f64,
    period: f64,
    n_samples: usize,
) -> TransientTrace {
    let vdd = params.vdd;
    let tau = 2.2 * (params.w_n / params.l) * params.cl / params.beta_n;

    let dt = if n_samples > 1 {
        period / (n_samples - 1) as f64
    } else {
        0.0
    };

    let mut times = Vec::with_capacity(n_samples);
    let mut vin = Vec::with_capacity(n_samples);
    let mut ideal = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let t = dt * i as f64;
        let high = t >= period / 2.0;
        times.push(t);
        vin.push(if high { vdd } else { 0.0 });
        // Ideal switching: the output jumps to the complementary rail the
        // moment the input transitions
        ideal.push(if high { 0.0 } else { vdd });
    }

    // Cutoff heuristic carried over from the reference analysis: tau is in
    // seconds, the normalized cutoff treats it as nanoseconds of Nyquist
    let cutoff = (1.0 / (tau * 1e9)).clamp(MIN_CUTOFF, MAX_CUTOFF);
    let filter = Iir::butterworth3(cutoff);
    let vout = filter.filtfilt(&ideal);

    let samples = times
        .into_iter()
        .zip(vin)
        .zip(vout)
        .map(|((t, vin), vout)| TransientSample { t, vin, vout })
        .collect();

    TransientTrace {
        samples,
        tau,
        tp_lh: rise_time,
        tp_hl: fall_time,
    }
}

/// Direct-form IIR filter with normalized denominator (`a[0] == 1`).
struct Iir {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl Iir {
    /// Third-order Butterworth low-pass at the given cutoff, normalized to
    /// Nyquist. Built by the bilinear transform of the cascaded analog
    /// prototype `1 / ((s + 1)(s^2 + s + 1))` with prewarped cutoff.
    fn butterworth3(cutoff: f64) -> Self {
        let wn = cutoff.clamp(MIN_CUTOFF, MAX_CUTOFF);
        let k = (PI * wn / 2.0).tan();

        // First-order section: wc / (s + wc)
        let d1 = k + 1.0;
        let b1 = [k / d1, k / d1];
        let a1 = [1.0, (k - 1.0) / d1];

        // Second-order section: wc^2 / (s^2 + wc*s + wc^2), Q = 1
        let d2 = k * k + k + 1.0;
        let b2 = [k * k / d2, 2.0 * k * k / d2, k * k / d2];
        let a2 = [1.0, 2.0 * (k * k - 1.0) / d2, (k * k - k + 1.0) / d2];

        Self {
            b: convolve(&b1, &b2),
            a: convolve(&a1, &a2),
        }
    }

    /// Run the filter over `x` once, forward.
    ///
    /// State is initialized to the steady state for a constant input equal
    /// to the first sample, so flat leading segments pass through unchanged.
    fn filter(&self, x: &[f64]) -> Vec<f64> {
        let order = self.a.len() - 1;
        let mut z = vec![0.0; order];

        if let Some(&x0) = x.first() {
            // Steady state: y = g * x0 with g the DC gain, states solved
            // back-to-front from the transposed direct-form II update
            let g = self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>();
            let y0 = g * x0;
            let mut acc = 0.0;
            for i in (0..order).rev() {
                acc += self.b[i + 1] * x0 - self.a[i + 1] * y0;
                z[i] = acc;
            }
        }

        x.iter()
            .map(|&xi| {
                let y = self.b[0] * xi + z[0];
                for i in 0..z.len() - 1 {
                    z[i] = self.b[i + 1] * xi - self.a[i + 1] * y + z[i + 1];
                }
                let last = z.len() - 1;
                z[last] = self.b[last + 1] * xi - self.a[last + 1] * y;
                y
            })
            .collect()
    }

    /// Forward-backward (zero-phase) filtering.
    fn filtfilt(&self, x: &[f64]) -> Vec<f64> {
        if x.is_empty() {
            return Vec::new();
        }
        let mut y = self.filter(x);
        y.reverse();
        let mut y = self.filter(&y);
        y.reverse();
        y
    }
}

/// Polynomial product of two coefficient arrays.
fn convolve(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        for (j, &qj) in q.iter().enumerate() {
            out[i + j] += pi * qj;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_filter_dc_gain_is_unity() {
        let f = Iir::butterworth3(0.2);
        let g = f.b.iter().sum::<f64>() / f.a.iter().sum::<f64>();
        assert_abs_diff_eq!(g, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_filter_passes_constant_signal() {
        let f = Iir::butterworth3(0.1);
        let x = vec![3.0; 64];
        let y = f.filtfilt(&x);
        for &yi in &y {
            assert_abs_diff_eq!(yi, 3.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_filtfilt_smooths_step_without_time_shift() {
        let f = Iir::butterworth3(0.2);
        let n = 201;
        let mid = n / 2;
        let x: Vec<f64> = (0..n).map(|i| if i < mid { 1.0 } else { 0.0 }).collect();
        let y = f.filtfilt(&x);

        // Levels preserved away from the edge
        assert_abs_diff_eq!(y[10], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(y[n - 10], 0.0, epsilon = 1e-3);

        // Zero phase: the half-amplitude crossing straddles the step index
        assert!(y[mid - 5] > 0.5);
        assert!(y[mid + 5] < 0.5);
    }

    #[test]
    fn test_trace_shape() {
        let params = DeviceParameters::default();
        let trace = simulate_transient(&params, 1e-9, 1e-9, 20e-9, 1000);

        assert_eq!(trace.samples.len(), 1000);
        assert_abs_diff_eq!(trace.samples[0].t, 0.0, epsilon = 1e-20);
        assert_abs_diff_eq!(trace.samples[999].t, 20e-9, epsilon = 1e-18);

        // Square-wave input: low half then high half
        assert_eq!(trace.samples[0].vin, 0.0);
        assert_eq!(trace.samples[999].vin, 5.0);
        let transitions = trace
            .samples
            .windows(2)
            .filter(|w| w[0].vin != w[1].vin)
            .count();
        assert_eq!(transitions, 1);

        // Output starts near the high rail and ends near the low rail
        assert!(trace.samples[0].vout > 4.0);
        assert!(trace.samples[999].vout < 1.0);
        assert!(trace.samples[100].vout > trace.samples[900].vout);

        // Smoothing never flings the trace far outside the rails
        for s in &trace.samples {
            assert!(s.vout > -1.0 && s.vout < 6.0, "t={}", s.t);
        }
    }

    #[test]
    fn test_time_constant_and_reported_delays() {
        let params = DeviceParameters::default();
        let trace = simulate_transient(&params, 0.5e-9, 0.3e-9, 20e-9, 200);

        // tau = 2.2 * (W_n/L) * CL / beta_n with the default parameters
        assert_abs_diff_eq!(trace.tau, 4.4e-7, epsilon = 1e-18);

        // Delays are echoed labels, not measurements
        assert_abs_diff_eq!(trace.tp_lh, 0.5e-9, epsilon = 1e-20);
        assert_abs_diff_eq!(trace.tp_hl, 0.3e-9, epsilon = 1e-20);
        assert_abs_diff_eq!(trace.tp_avg(), 0.4e-9, epsilon = 1e-20);
    }

    #[test]
    fn test_pathological_tau_is_clamped() {
        // Tiny beta_n drives tau huge and the raw cutoff far below the
        // stable range; the clamp keeps the trace finite and bounded
        let params = DeviceParameters {
            beta_n: 1e-12,
            ..DeviceParameters::default()
        };
        let trace = simulate_transient(&params, 1e-9, 1e-9, 20e-9, 256);
        for s in &trace.samples {
            assert!(s.vout.is_finite());
            assert!(s.vout > -6.0 && s.vout < 11.0);
        }
    }

    #[test]
    fn test_degenerate_sample_counts() {
        let params = DeviceParameters::default();

        let empty = simulate_transient(&params, 1e-9, 1e-9, 20e-9, 0);
        assert!(empty.samples.is_empty());

        let one = simulate_transient(&params, 1e-9, 1e-9, 20e-9, 1);
        assert_eq!(one.samples.len(), 1);
        assert!(one.samples[0].vout.is_finite());
    }
}

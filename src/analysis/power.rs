//! Static and dynamic power across a frequency sweep.

use crate::device::DeviceParameters;
use crate::ACTIVITY_FACTOR;

/// Placeholder leakage power (W); not derived from the device equations.
pub const STATIC_POWER: f64 = 1e-9;

/// Power breakdown at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerPoint {
    /// Switching frequency (Hz)
    pub frequency: f64,
    /// Static (leakage) power (W)
    pub p_static: f64,
    /// Dynamic switching power (W)
    pub p_dynamic: f64,
    /// Total power (W)
    pub p_total: f64,
}

/// Ordered power profile over a log-spaced frequency range.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerProfile {
    pub points: Vec<PowerPoint>,
}

impl PowerProfile {
    /// Number of frequency points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the profile holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Compute the power profile over `[freq_min, freq_max]`.
///
/// Frequencies are log-spaced, endpoints included. Dynamic power follows
/// `alpha * CL * Vdd^2 * f` with a fixed activity factor of 0.5; static
/// power is the [`STATIC_POWER`] placeholder. Purely combinational, no
/// solver involved.
pub fn power_profile(
    params: &DeviceParameters,
    freq_min: f64,
    freq_max: f64,
    n_points: usize,
) -> PowerProfile {
    let points = logspace(freq_min, freq_max, n_points)
        .map(|f| {
            let p_dynamic = ACTIVITY_FACTOR * params.cl * params.vdd * params.vdd * f;
            PowerPoint {
                frequency: f,
                p_static: STATIC_POWER,
                p_dynamic,
                p_total: STATIC_POWER + p_dynamic,
            }
        })
        .collect();
    PowerProfile { points }
}

/// Logarithmically spaced samples over `[start, end]`, endpoints included.
fn logspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let log_start = start.log10();
    let log_end = end.log10();
    let step = if n > 1 {
        (log_end - log_start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| {
        if i == 0 {
            start
        } else if i + 1 == n {
            end
        } else {
            10f64.powf(log_start + step * i as f64)
        }
    })
}

//! Bounded scalar Newton-Raphson iteration with bisection safeguarding.

use super::{SolverOptions, DERIVATIVE_STEP};

/// Find a root of `f` within `[lo, hi]`, seeded at `x0`.
///
/// Takes Newton-Raphson steps using a central finite-difference derivative
/// and falls back to bisection whenever a step leaves the current bracket or
/// the derivative degenerates (the square-law residual has flat plateaus away
/// from the root). The bracket endpoints must produce residuals of opposite
/// sign, or be roots themselves.
///
/// Returns `None` when the interval does not bracket a root, the iteration
/// cap is exceeded, or an iterate becomes non-finite. Callers supply their
/// own fallback value in that case.
pub fn find_root<F>(f: F, lo: f64, hi: f64, x0: f64, options: &SolverOptions) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    let mut lo = lo;
    let mut hi = hi;
    let flo = f(lo);
    let fhi = f(hi);

    if !flo.is_finite() || !fhi.is_finite() {
        return None;
    }
    if flo == 0.0 {
        return Some(lo);
    }
    if fhi == 0.0 {
        return Some(hi);
    }
    if flo.signum() == fhi.signum() {
        return None;
    }

    let low_sign = flo.signum();
    let mut x = x0.clamp(lo, hi);

    for _ in 0..options.max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return None;
        }
        if fx == 0.0 {
            return Some(x);
        }

        // Shrink the bracket around the sign change
        if fx.signum() == low_sign {
            lo = x;
        } else {
            hi = x;
        }

        // Central difference scaled to the magnitude of the iterate
        let h = DERIVATIVE_STEP * x.abs().max(1.0);
        let dfx = (f(x + h) - f(x - h)) / (2.0 * h);

        let newton = if dfx.is_finite() && dfx.abs() > f64::EPSILON {
            x - fx / dfx
        } else {
            f64::NAN
        };

        // Bisect when the Newton step is unusable or escapes the bracket
        let next = if newton.is_finite() && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };

        if (next - x).abs() < options.tolerance * x.abs().max(1.0) {
            return Some(next);
        }
        x = next;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_finds_quadratic_root() {
        let options = SolverOptions::default();
        let root = find_root(|x| x * x - 4.0, 0.0, 10.0, 3.0, &options).unwrap();
        assert_abs_diff_eq!(root, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_finds_piecewise_root() {
        // Piecewise residual resembling the current balance: flat then sloped
        let f = |x: f64| if x < 1.0 { -1.0 } else { x - 2.0 };
        let options = SolverOptions::default();
        let root = find_root(f, 0.0, 5.0, 4.0, &options).unwrap();
        assert_abs_diff_eq!(root, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_root_at_bracket_edge() {
        let options = SolverOptions::default();
        let root = find_root(|x| x - 5.0, 0.0, 5.0, 2.0, &options).unwrap();
        assert_abs_diff_eq!(root, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_bracket_fails_cleanly() {
        let options = SolverOptions::default();
        assert!(find_root(|_| 1.0, 0.0, 5.0, 2.0, &options).is_none());
    }

    #[test]
    fn test_iteration_cap_respected() {
        let options = SolverOptions::new().with_max_iterations(2);
        // Steep sigmoid needs more than two safeguarded steps from far away
        let f = |x: f64| (1e6 * (x - 3.123456)).tanh();
        assert!(find_root(f, 0.0, 10.0, 0.1, &options).is_none());
    }
}

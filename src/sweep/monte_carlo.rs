//! Monte Carlo process-variation analysis.
//!
//! Each sample perturbs the threshold voltages and transconductances of the
//! nominal parameter set with independent Gaussian draws, then recomputes
//! the critical points. Variation fractions are interpreted as 3-sigma
//! bounds: a fraction of 0.1 means the draw's standard deviation is
//! `0.1 * |nominal| / 3`.
//!
//! Sampling is fully deterministic for a given seed. The generator is an
//! explicit value passed through the run, never ambient global state, so
//! tests can assert exact sample sequences.

use crate::analysis::{self, CriticalPoints};
use crate::device::DeviceParameters;
use crate::solver::SolverOptions;

/// Source of standard-normal deviates for parameter perturbation.
///
/// Implement this to inject a custom generator; [`Lcg64`] is the default.
pub trait GaussianSource {
    /// Draw one standard-normal value.
    fn next_gaussian(&mut self) -> f64;
}

/// Seeded 64-bit linear congruential generator with a Box-Muller transform.
///
/// Small, portable, and reproducible across platforms; statistical quality
/// is more than sufficient for perturbing a handful of device parameters.
#[derive(Debug, Clone)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform deviate in the open interval (0, 1).
    pub fn next_uniform(&mut self) -> f64 {
        // Top 53 bits, offset by half an ulp to exclude both endpoints
        ((self.next_u64() >> 11) as f64 + 0.5) / (1u64 << 53) as f64
    }
}

impl GaussianSource for Lcg64 {
    fn next_gaussian(&mut self) -> f64 {
        // Box-Muller; the second deviate of the pair is discarded to keep
        // the draw order independent of call parity
        let u1 = self.next_uniform();
        let u2 = self.next_uniform();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Configuration for one Monte Carlo run.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloConfig {
    /// Number of samples to draw.
    pub n_samples: usize,
    /// Seed for the default generator.
    pub seed: u64,
    /// 3-sigma variation fraction for `vtn`.
    pub vtn_fraction: f64,
    /// 3-sigma variation fraction for `vtp`.
    pub vtp_fraction: f64,
    /// 3-sigma variation fraction for `beta_n`.
    pub beta_n_fraction: f64,
    /// 3-sigma variation fraction for `beta_p`.
    pub beta_p_fraction: f64,
    /// Minimum acceptable noise margin for the yield count (V).
    pub min_margin: f64,
    /// Solver limits applied to every sample.
    pub solver: SolverOptions,
}

impl Default for MonteCarloConfig {
    /// 100 samples, seed 42, 10% threshold and 20% transconductance
    /// variation, 0.3 V margin specification.
    fn default() -> Self {
        Self {
            n_samples: 100,
            seed: 42,
            vtn_fraction: 0.1,
            vtp_fraction: 0.1,
            beta_n_fraction: 0.2,
            beta_p_fraction: 0.2,
            min_margin: 0.3,
            solver: SolverOptions::default(),
        }
    }
}

impl MonteCarloConfig {
    /// Create a config with the default variation model.
    pub fn new(n_samples: usize) -> Self {
        Self {
            n_samples,
            ..Self::default()
        }
    }

    /// Set the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the yield margin specification.
    pub fn with_min_margin(mut self, min_margin: f64) -> Self {
        self.min_margin = min_margin;
        self
    }
}

/// One Monte Carlo draw: the perturbed parameters and their critical points.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationSample {
    pub params: DeviceParameters,
    pub critical_points: CriticalPoints,
}

/// Mean and standard deviation of one quantity across the sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStat {
    pub mean: f64,
    pub std_dev: f64,
}

impl SummaryStat {
    /// Population statistics over `samples`; NaN for an empty set.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        Self {
            mean,
            std_dev: var.sqrt(),
        }
    }
}

/// Summary statistics for a Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationSummary {
    pub vm: SummaryStat,
    pub nml: SummaryStat,
    pub nmh: SummaryStat,
    /// Fraction of samples whose NML and NMH both meet the margin
    /// specification; NaN for an empty run.
    pub yield_fraction: f64,
}

/// Result of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloRun {
    pub samples: Vec<VariationSample>,
    pub summary: VariationSummary,
}

/// Run a Monte Carlo variation analysis with the default seeded generator.
pub fn monte_carlo(nominal: &DeviceParameters, config: &MonteCarloConfig) -> MonteCarloRun {
    let mut source = Lcg64::new(config.seed);
    monte_carlo_with_source(nominal, config, &mut source)
}

/// Run a Monte Carlo variation analysis with an injected generator.
///
/// Draws are made in a fixed field order (`vtn`, `vtp`, `beta_n`, `beta_p`)
/// so a given generator state always produces the same sample sequence. A
/// perturbed set that violates the parameter invariants keeps its values but
/// degrades to the nominal-default critical points rather than aborting the
/// batch.
pub fn monte_carlo_with_source(
    nominal: &DeviceParameters,
    config: &MonteCarloConfig,
    source: &mut dyn GaussianSource,
) -> MonteCarloRun {
    let mut samples = Vec::with_capacity(config.n_samples);

    for _ in 0..config.n_samples {
        let params = DeviceParameters {
            vtn: perturb(nominal.vtn, config.vtn_fraction, source),
            vtp: perturb(nominal.vtp, config.vtp_fraction, source),
            beta_n: perturb(nominal.beta_n, config.beta_n_fraction, source),
            beta_p: perturb(nominal.beta_p, config.beta_p_fraction, source),
            ..*nominal
        };

        let critical_points = match params.validated() {
            Ok(valid) => analysis::compute_critical_points_with(&valid, &config.solver),
            // An extreme draw can push a parameter out of range; degrade
            // instead of dropping the sample so counts stay exact
            Err(_) => CriticalPoints::fallback(nominal),
        };

        samples.push(VariationSample {
            params,
            critical_points,
        });
    }

    let summary = summarize(&samples, config.min_margin);
    MonteCarloRun { samples, summary }
}

/// Gaussian perturbation with the fraction interpreted as a 3-sigma bound.
fn perturb(nominal: f64, fraction: f64, source: &mut dyn GaussianSource) -> f64 {
    let sigma = fraction * nominal.abs() / 3.0;
    nominal + sigma * source.next_gaussian()
}

fn summarize(samples: &[VariationSample], min_margin: f64) -> VariationSummary {
    let vm: Vec<f64> = samples.iter().map(|s| s.critical_points.vm).collect();
    let nml: Vec<f64> = samples.iter().map(|s| s.critical_points.nml).collect();
    let nmh: Vec<f64> = samples.iter().map(|s| s.critical_points.nmh).collect();

    let yield_fraction = if samples.is_empty() {
        f64::NAN
    } else {
        let passing = samples
            .iter()
            .filter(|s| s.critical_points.nml >= min_margin && s.critical_points.nmh >= min_margin)
            .count();
        passing as f64 / samples.len() as f64
    };

    VariationSummary {
        vm: SummaryStat::from_samples(&vm),
        nml: SummaryStat::from_samples(&nml),
        nmh: SummaryStat::from_samples(&nmh),
        yield_fraction,
    }
}

//! Inverter - CMOS inverter characterization demo.
//!
//! Runs the full characterization sequence for one technology setup and
//! prints plain-text summaries: critical points, VTC endpoints, transient
//! timing, power-vs-frequency, a supply sweep, and a Monte Carlo variation
//! run.
//!
//! # Usage
//!
//! ```bash
//! inverter --vdd 3.3 --vtn 0.7 --vtp -0.7 --samples 200
//! ```

use clap::Parser;
use inverter_core::{
    analysis, report,
    sweep::{self, MonteCarloConfig, SweepField},
    DeviceParameters, Result, SolverOptions, DEFAULT_VTC_POINTS,
};

/// CMOS inverter characterization demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Supply voltage (V)
    #[arg(long, default_value_t = 5.0)]
    vdd: f64,

    /// NMOS threshold voltage (V)
    #[arg(long, default_value_t = 1.0)]
    vtn: f64,

    /// PMOS threshold voltage (V, negative convention)
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    vtp: f64,

    /// NMOS transconductance (A/V^2)
    #[arg(long, default_value_t = 100e-6)]
    beta_n: f64,

    /// PMOS transconductance (A/V^2)
    #[arg(long, default_value_t = 50e-6)]
    beta_p: f64,

    /// Monte Carlo sample count
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Monte Carlo seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let params = DeviceParameters::new(args.vdd, args.vtn, args.vtp, args.beta_n, args.beta_p)?;
    let options = SolverOptions::default();

    // Static characterization
    let cp = analysis::compute_critical_points(&params);
    print!("{}", report::summary(&params, &cp));

    let vtc = analysis::generate_vtc(&params, DEFAULT_VTC_POINTS);
    if let (Some(first), Some(last)) = (vtc.points.first(), vtc.points.last()) {
        println!(
            "\nVTC: {} points, Vout({:.1}) = {:.3} V, Vout({:.1}) = {:.3} V, {} converged",
            vtc.len(),
            first.vin,
            first.vout,
            last.vin,
            last.vout,
            vtc.converged_count(),
        );
    }

    // Transient timing
    let trace = analysis::simulate_transient(&params, 1e-9, 1e-9, 20e-9, 1000);
    println!("\nTransient (tau = {:.3e} s):", trace.tau);
    println!("  tpLH: {:.2} ns", trace.tp_lh * 1e9);
    println!("  tpHL: {:.2} ns", trace.tp_hl * 1e9);
    println!("  avg:  {:.2} ns", trace.tp_avg() * 1e9);

    // Power profile
    let profile = analysis::power_profile(&params, 1e3, 1e9, 7);
    println!("\nPower vs frequency:");
    print!("{}", report::power_table(&profile));

    // Supply sweep
    let values = [0.66 * args.vdd, args.vdd, 1.2 * args.vdd];
    println!("\nSupply sweep:");
    for entry in sweep::sweep(&params, SweepField::Vdd, &values, 51, &options)? {
        println!(
            "  Vdd = {:.2} V -> Vm = {:.2} V, NML = {:.2} V, NMH = {:.2} V",
            entry.value,
            entry.critical_points.vm,
            entry.critical_points.nml,
            entry.critical_points.nmh
        );
    }

    // Monte Carlo variation
    let config = MonteCarloConfig::new(args.samples).with_seed(args.seed);
    let run = sweep::monte_carlo(&params, &config);
    println!();
    print!("{}", report::monte_carlo_summary(&run, config.min_margin));

    Ok(())
}

//! Plain-text report formatting (CLI only).
//!
//! Consumes the numeric records produced by the core and renders them for a
//! terminal. The core never calls into this module; it exists for the demo
//! binary and any other text-based frontend.

use std::fmt::Write;

use crate::analysis::{CriticalPoints, PowerProfile};
use crate::device::DeviceParameters;
use crate::sweep::MonteCarloRun;

/// Render the characterization summary table.
pub fn summary(params: &DeviceParameters, cp: &CriticalPoints) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);
    let thin = "-".repeat(40);

    writeln!(out, "{rule}").unwrap();
    writeln!(out, "CMOS INVERTER CHARACTERIZATION SUMMARY").unwrap();
    writeln!(out, "{rule}").unwrap();
    writeln!(out, "Supply Voltage (Vdd):     {:.2} V", params.vdd).unwrap();
    writeln!(out, "NMOS Threshold (Vtn):     {:.2} V", params.vtn).unwrap();
    writeln!(out, "PMOS Threshold (Vtp):     {:.2} V", params.vtp).unwrap();
    writeln!(out, "Switching Threshold (Vm): {:.2} V", cp.vm).unwrap();
    writeln!(out, "{thin}").unwrap();
    writeln!(out, "NOISE MARGINS:").unwrap();
    writeln!(out, "  VOH (Output High):      {:.2} V", cp.voh).unwrap();
    writeln!(out, "  VOL (Output Low):       {:.2} V", cp.vol).unwrap();
    writeln!(out, "  VIH (Input High):       {:.2} V", cp.vih).unwrap();
    writeln!(out, "  VIL (Input Low):        {:.2} V", cp.vil).unwrap();
    writeln!(out, "  NMH (High Margin):      {:.2} V", cp.nmh).unwrap();
    writeln!(out, "  NML (Low Margin):       {:.2} V", cp.nml).unwrap();
    writeln!(out, "{thin}").unwrap();
    writeln!(out, "DEVICE PARAMETERS:").unwrap();
    writeln!(out, "  bn (NMOS):              {:.1} uA/V^2", params.beta_n * 1e6).unwrap();
    writeln!(out, "  bp (PMOS):              {:.1} uA/V^2", params.beta_p * 1e6).unwrap();
    writeln!(out, "  Load Capacitance:       {:.1} pF", params.cl * 1e12).unwrap();
    writeln!(out, "{rule}").unwrap();
    out
}

/// Render the power profile as a frequency table.
pub fn power_table(profile: &PowerProfile) -> String {
    let mut out = String::new();
    writeln!(out, "{:>12}  {:>12}  {:>12}  {:>12}", "f (Hz)", "static (nW)", "dynamic (nW)", "total (nW)").unwrap();
    for p in &profile.points {
        writeln!(
            out,
            "{:>12.3e}  {:>12.3}  {:>12.3}  {:>12.3}",
            p.frequency,
            p.p_static * 1e9,
            p.p_dynamic * 1e9,
            p.p_total * 1e9
        )
        .unwrap();
    }
    out
}

/// Render Monte Carlo summary statistics.
pub fn monte_carlo_summary(run: &MonteCarloRun, min_margin: f64) -> String {
    let mut out = String::new();
    let s = &run.summary;
    writeln!(out, "Monte Carlo Results ({} samples):", run.samples.len()).unwrap();
    writeln!(
        out,
        "Switching Threshold: {:.3} +/- {:.3} V",
        s.vm.mean, s.vm.std_dev
    )
    .unwrap();
    writeln!(
        out,
        "Low Noise Margin:    {:.3} +/- {:.3} V",
        s.nml.mean, s.nml.std_dev
    )
    .unwrap();
    writeln!(
        out,
        "High Noise Margin:   {:.3} +/- {:.3} V",
        s.nmh.mean, s.nmh.std_dev
    )
    .unwrap();
    writeln!(
        out,
        "Yield (NM >= {:.2} V): {:.1}%",
        min_margin,
        s.yield_fraction * 100.0
    )
    .unwrap();
    out
}

//! Output formatting for evaluator results.
//!
//! Every renderer returns a `String` so the binary decides where it goes and
//! tests can inspect it without capturing stdout.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use fermidirac_lib::{
    thermal_width, DerivativeCurve, MultiCurve, OccupationCurve, PhysicsInfo, Regime, Spacing,
    Surface,
};

use crate::terminal::{occupation_bar, Palette};

/// Width of the occupation bar in text output.
const BAR_WIDTH: usize = 24;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Comma-separated values (curve only).
    Csv,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Single-point evaluation as printed by `fermidirac occupation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupationReport {
    pub energy: f64,
    pub temperature: f64,
    pub mu: f64,
    pub occupation: f64,
}

/// Regime classification as printed by `fermidirac regime`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeReport {
    pub temperature: f64,
    pub fermi_temperature: f64,
    pub ratio: f64,
    pub regime: Regime,
    pub description: &'static str,
}

/// Thermal width as printed by `fermidirac width`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidthReport {
    pub temperature: f64,
    pub thermal_width: f64,
}

/// Serialize any result as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

pub fn render_occupation(report: &OccupationReport) -> String {
    format!(
        "f(E = {} eV, T = {} K, mu = {} eV) = {:.6}\n",
        report.energy, report.temperature, report.mu, report.occupation
    )
}

/// Curve table with one bar per energy and an optional Maxwell-Boltzmann column.
pub fn render_curve(curve: &OccupationCurve, mu: f64, palette: &Palette, unicode: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}Occupation at T = {} K{} (mu = {} eV, thermal width {:.4} eV)",
        palette.bold,
        curve.temperature(),
        palette.reset,
        mu,
        thermal_width(curve.temperature())
    );

    let classical = curve.maxwell_boltzmann();
    let _ = write!(out, "{}{:>12}  {:>10}", palette.gray, "E (eV)", "f(E)");
    if classical.is_some() {
        let _ = write!(out, "  {:>12}", "MB");
    }
    let _ = writeln!(out, "{}", palette.reset);

    for (index, (energy, occupation)) in curve.points().enumerate() {
        let _ = write!(out, "{energy:>12.6}  {occupation:>10.6}");
        if let Some(values) = classical {
            let _ = write!(out, "  {:>12.4e}", values[index]);
        }
        let _ = writeln!(
            out,
            "  {}{}{}",
            palette.cyan,
            occupation_bar(occupation, BAR_WIDTH, unicode),
            palette.reset
        );
    }
    out
}

/// One column per temperature, sharing the energy column.
///
/// `includes_zero` adds a note that the `T=0K` column is the exact step.
pub fn render_multi(multi: &MultiCurve, mu: f64, includes_zero: bool, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}Occupation for {} temperatures{} (mu = {} eV)",
        palette.bold,
        multi.curves.len(),
        palette.reset,
        mu
    );
    if includes_zero {
        let _ = writeln!(
            out,
            "{}T=0K is the exact step: 1 below mu, 0.5 at mu, 0 above{}",
            palette.gray, palette.reset
        );
    }

    let _ = write!(out, "{}{:>12}", palette.gray, "E (eV)");
    for curve in &multi.curves {
        let _ = write!(out, "  {:>10}", format!("T={}K", curve.temperature));
    }
    let _ = writeln!(out, "{}", palette.reset);

    for (index, energy) in multi.energies.iter().enumerate() {
        let _ = write!(out, "{energy:>12.6}");
        for curve in &multi.curves {
            let _ = write!(out, "  {:>10.6}", curve.occupation[index]);
        }
        let _ = writeln!(out);
    }
    out
}

/// One summary line per temperature row of the surface.
pub fn render_surface(surface: &Surface, mu: f64, spacing: Spacing, palette: &Palette) -> String {
    let (rows, columns) = surface.shape();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}Surface: {rows} temperatures x {columns} energies{} ({spacing} axis, mu = {mu} eV)",
        palette.bold, palette.reset
    );
    let _ = writeln!(
        out,
        "{}{:>14}  {:>12}  {:>10}  {:>10}{}",
        palette.gray, "T (K)", "width (eV)", "f(E_min)", "f(E_max)", palette.reset
    );

    for (temperature, row) in surface.temperatures.iter().zip(&surface.occupation) {
        let first = row.first().copied().unwrap_or(f64::NAN);
        let last = row.last().copied().unwrap_or(f64::NAN);
        let _ = writeln!(
            out,
            "{temperature:>14.4}  {:>12.6}  {first:>10.6}  {last:>10.6}",
            thermal_width(*temperature)
        );
    }
    out
}

/// Derivative table; the T = 0 delta at μ is printed as `delta`.
pub fn render_derivative(derivative: &DerivativeCurve, mu: f64, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}df/dE at T = {} K{} (mu = {} eV, peak width ~{:.4} eV)",
        palette.bold, derivative.temperature, palette.reset, mu, derivative.peak_width
    );
    let _ = writeln!(
        out,
        "{}{:>12}  {:>14}{}",
        palette.gray, "E (eV)", "df/dE (1/eV)", palette.reset
    );

    for (energy, value) in derivative.energies.iter().zip(&derivative.derivative) {
        match value {
            Some(slope) => {
                let _ = writeln!(out, "{energy:>12.6}  {slope:>14.6e}");
            }
            None => {
                let _ = writeln!(out, "{energy:>12.6}  {:>14}", "delta");
            }
        }
    }
    out
}

pub fn render_width(report: &WidthReport) -> String {
    format!(
        "Thermal width at T = {} K: {:.6} eV (4 k_B T)\n",
        report.temperature, report.thermal_width
    )
}

pub fn render_regime(report: &RegimeReport, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Regime: {}{}{}",
        palette.regime(report.regime),
        report.regime,
        palette.reset
    );
    let _ = writeln!(out, "  T       = {} K", report.temperature);
    let _ = writeln!(out, "  T_F     = {:.1} K", report.fermi_temperature);
    let _ = writeln!(out, "  T / T_F = {:.6}", report.ratio);
    let _ = writeln!(out, "  {}", report.description);
    out
}

pub fn render_info(info: &PhysicsInfo, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}Fermi-Dirac distribution{}", palette.bold, palette.reset);
    let _ = writeln!(out, "  {}", info.equation);
    let _ = writeln!(out, "  k_B = {:e} eV/K", info.k_b_ev);
    let _ = writeln!(out, "  k_B = {:e} J/K", info.k_b_si);
    let _ = writeln!(out);
    for entry in &info.regimes {
        let _ = writeln!(
            out,
            "{}{}{}: {}",
            palette.regime(entry.regime),
            entry.regime,
            palette.reset,
            entry.condition
        );
        let _ = writeln!(out, "  {}", entry.description);
        let _ = writeln!(out, "  e.g. {}", entry.applications.join(", "));
    }
    out
}

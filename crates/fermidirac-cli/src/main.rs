use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fermidirac_cli::output::{
    render_curve, render_derivative, render_info, render_multi, render_occupation, render_regime,
    render_surface, render_width, to_json, OccupationReport, OutputFormat, RegimeReport,
    WidthReport,
};
use fermidirac_cli::terminal::{supports_unicode, Palette};
use fermidirac_lib::{
    classify, curve, derivative_curve, fermi_temperature, multi_curve, occupation, physics_info,
    surface, thermal_width, validate_chemical_potential, validate_temperature, write_curve_csv,
    EnergyGrid, Spacing, TemperatureSet,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fermi-Dirac occupation calculator")]
struct Cli {
    /// Output format (csv is only available for `curve`).
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

/// Energy range shared by every grid-based subcommand.
#[derive(Args, Debug, Clone)]
struct EnergyArgs {
    /// Chemical potential in eV.
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    mu: f64,
    /// Lower energy bound in eV.
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    energy_min: f64,
    /// Upper energy bound in eV.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    energy_max: f64,
    /// Number of energy points.
    #[arg(long, default_value_t = 500)]
    points: usize,
    /// Energy grid spacing (log requires a positive range).
    #[arg(long, default_value_t = Spacing::Linear)]
    spacing: Spacing,
}

impl EnergyArgs {
    fn grid(&self) -> Result<EnergyGrid> {
        validate_chemical_potential(self.mu)?;
        EnergyGrid::new(self.energy_min, self.energy_max, self.points, self.spacing)
            .context("invalid energy grid")
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate f(E) at a single energy.
    Occupation {
        /// Energy in eV.
        #[arg(long, allow_negative_numbers = true)]
        energy: f64,
        /// Temperature in K.
        #[arg(long, default_value_t = 300.0)]
        temperature: f64,
        /// Chemical potential in eV.
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        mu: f64,
    },
    /// Occupation curve at one temperature.
    Curve {
        /// Temperature in K.
        #[arg(long, default_value_t = 300.0)]
        temperature: f64,
        #[command(flatten)]
        energy: EnergyArgs,
        /// Include the Maxwell-Boltzmann comparison curve.
        #[arg(long)]
        maxwell_boltzmann: bool,
        /// Write the result to a file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Curves for several temperatures on a shared grid.
    Multi {
        /// Comma-separated temperatures in K (sorted and de-duplicated).
        #[arg(long, value_delimiter = ',', default_value = "0,100,300,1000,3000")]
        temperatures: Vec<f64>,
        #[command(flatten)]
        energy: EnergyArgs,
        /// Include Maxwell-Boltzmann curves for T > 0.
        #[arg(long)]
        maxwell_boltzmann: bool,
    },
    /// Occupation surface over energy and temperature.
    Surface {
        #[command(flatten)]
        energy: EnergyArgs,
        /// Lowest temperature in K (log axes are floored at 0.1 K).
        #[arg(long, default_value_t = 1.0)]
        temp_min: f64,
        /// Highest temperature in K.
        #[arg(long, default_value_t = 5000.0)]
        temp_max: f64,
        /// Number of temperatures.
        #[arg(long, default_value_t = 100)]
        temp_points: usize,
        /// Temperature axis spacing.
        #[arg(long, default_value_t = Spacing::Log)]
        temp_scale: Spacing,
    },
    /// Derivative df/dE over the energy grid.
    Derivative {
        /// Temperature in K.
        #[arg(long, default_value_t = 300.0)]
        temperature: f64,
        #[command(flatten)]
        energy: EnergyArgs,
    },
    /// Thermal width 4 k_B T.
    Width {
        /// Temperature in K.
        #[arg(long)]
        temperature: f64,
    },
    /// Classify a temperature against the Fermi temperature.
    Regime {
        /// Temperature in K.
        #[arg(long, default_value_t = 300.0)]
        temperature: f64,
        /// Fermi energy in eV.
        #[arg(long, conflicts_with = "fermi_temperature", required_unless_present = "fermi_temperature")]
        fermi_energy: Option<f64>,
        /// Fermi temperature in K.
        #[arg(long)]
        fermi_temperature: Option<f64>,
    },
    /// Constants, equation and regime descriptions.
    Info,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.format;

    if format == OutputFormat::Csv && !matches!(cli.command, Command::Curve { .. }) {
        bail!("csv output is only supported by the curve command");
    }

    let palette = Palette::detect();
    match cli.command {
        Command::Occupation {
            energy,
            temperature,
            mu,
        } => handle_occupation(format, energy, temperature, mu),
        Command::Curve {
            temperature,
            energy,
            maxwell_boltzmann,
            output,
        } => handle_curve(
            format,
            &palette,
            temperature,
            &energy,
            maxwell_boltzmann,
            output.as_deref(),
        ),
        Command::Multi {
            temperatures,
            energy,
            maxwell_boltzmann,
        } => handle_multi(format, &palette, temperatures, &energy, maxwell_boltzmann),
        Command::Surface {
            energy,
            temp_min,
            temp_max,
            temp_points,
            temp_scale,
        } => {
            let grid = energy.grid()?;
            let result = surface(&grid, temp_min, temp_max, temp_points, temp_scale, energy.mu)
                .context("invalid temperature axis")?;
            match format {
                OutputFormat::Json => emit(&to_json(&result)?),
                _ => emit(&render_surface(&result, energy.mu, temp_scale, &palette)),
            }
        }
        Command::Derivative {
            temperature,
            energy,
        } => {
            validate_temperature(temperature)?;
            let result = derivative_curve(&energy.grid()?, temperature, energy.mu);
            match format {
                OutputFormat::Json => emit(&to_json(&result)?),
                _ => emit(&render_derivative(&result, energy.mu, &palette)),
            }
        }
        Command::Width { temperature } => {
            validate_temperature(temperature)?;
            let report = WidthReport {
                temperature,
                thermal_width: thermal_width(temperature),
            };
            match format {
                OutputFormat::Json => emit(&to_json(&report)?),
                _ => emit(&render_width(&report)),
            }
        }
        Command::Regime {
            temperature,
            fermi_energy,
            fermi_temperature: t_f,
        } => handle_regime(format, &palette, temperature, fermi_energy, t_f),
        Command::Info => {
            let info = physics_info();
            match format {
                OutputFormat::Json => emit(&to_json(&info)?),
                _ => emit(&render_info(&info, &palette)),
            }
        }
    }
}

fn handle_occupation(format: OutputFormat, energy: f64, temperature: f64, mu: f64) -> Result<()> {
    validate_temperature(temperature)?;
    validate_chemical_potential(mu)?;
    if !energy.is_finite() {
        bail!("energy must be finite, got {energy}");
    }

    let report = OccupationReport {
        energy,
        temperature,
        mu,
        occupation: occupation(energy, temperature, mu),
    };
    match format {
        OutputFormat::Json => emit(&to_json(&report)?),
        _ => emit(&render_occupation(&report)),
    }
}

fn handle_curve(
    format: OutputFormat,
    palette: &Palette,
    temperature: f64,
    energy: &EnergyArgs,
    maxwell_boltzmann: bool,
    output: Option<&Path>,
) -> Result<()> {
    validate_temperature(temperature)?;
    let grid = energy.grid()?;
    let result = curve(&grid, temperature, energy.mu, maxwell_boltzmann);
    debug!(points = grid.len(), temperature, "evaluated curve");

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Csv => {
            write_curve_csv(&mut writer, &result, energy.mu).context("failed to write CSV")?
        }
        OutputFormat::Json => writeln!(writer, "{}", to_json(&result)?)?,
        OutputFormat::Text => {
            // Files never get escape codes.
            let palette = if output.is_some() {
                Palette::plain()
            } else {
                *palette
            };
            write!(
                writer,
                "{}",
                render_curve(&result, energy.mu, &palette, supports_unicode())
            )?
        }
    }
    writer.flush()?;

    if let Some(path) = output {
        eprintln!("Wrote {} points to {}", grid.len(), path.display());
    }
    Ok(())
}

fn handle_multi(
    format: OutputFormat,
    palette: &Palette,
    temperatures: Vec<f64>,
    energy: &EnergyArgs,
    maxwell_boltzmann: bool,
) -> Result<()> {
    let set = TemperatureSet::new(temperatures)
        .context("invalid temperature list")?
        .sorted_unique();
    let result = multi_curve(&energy.grid()?, &set, energy.mu, maxwell_boltzmann);
    match format {
        OutputFormat::Json => emit(&to_json(&result)?),
        _ => emit(&render_multi(&result, energy.mu, set.contains_zero(), palette)),
    }
}

fn handle_regime(
    format: OutputFormat,
    palette: &Palette,
    temperature: f64,
    fermi_energy: Option<f64>,
    t_f: Option<f64>,
) -> Result<()> {
    let t_f = match (fermi_energy, t_f) {
        (Some(e_f), _) => fermi_temperature(e_f),
        (None, Some(t_f)) => t_f,
        (None, None) => bail!("either --fermi-energy or --fermi-temperature is required"),
    };
    let regime = classify(temperature, t_f)?;
    let report = RegimeReport {
        temperature,
        fermi_temperature: t_f,
        ratio: temperature / t_f,
        regime,
        description: regime.description(),
    };
    match format {
        OutputFormat::Json => emit(&to_json(&report)?),
        _ => emit(&render_regime(&report, palette)),
    }
}

fn emit(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

//! Resona command-line interface.
//!
//! Sweep ring resonator spectra from TOML configuration files:
//! ```sh
//! resona-cli run job.toml
//! resona-cli validate job.toml
//! resona-cli convert 1.55 --from wavelength --to frequency --unit um
//! resona-cli resonances --min 1.54 --max 1.56 --length 300
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use resona_core::units::{LengthUnit, SpectralConverter, SpectralQuantity};

#[derive(Parser)]
#[command(name = "resona-cli")]
#[command(about = "Resona: All-Pass Ring Resonator Calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a sweep from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the sweep.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Convert between wavelength, wavenumber and frequency.
    Convert {
        /// Value to convert (must be positive).
        value: f64,
        #[arg(long, value_enum)]
        from: Quantity,
        #[arg(long, value_enum)]
        to: Quantity,
        /// Length unit for wavelengths and wavenumbers.
        #[arg(long, value_enum, default_value_t = Unit::Um)]
        unit: Unit,
    },
    /// List the resonant modes of a ring inside a wavelength window.
    Resonances {
        /// Shortest wavelength of the window.
        #[arg(long)]
        min: f64,
        /// Longest wavelength of the window.
        #[arg(long)]
        max: f64,
        /// Round-trip length of the ring (same unit as the wavelengths).
        #[arg(long)]
        length: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Quantity {
    Wavelength,
    Wavenumber,
    Frequency,
}

impl From<Quantity> for SpectralQuantity {
    fn from(q: Quantity) -> Self {
        match q {
            Quantity::Wavelength => SpectralQuantity::Wavelength,
            Quantity::Wavenumber => SpectralQuantity::Wavenumber,
            Quantity::Frequency => SpectralQuantity::Frequency,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Unit {
    M,
    Um,
    Nm,
}

impl From<Unit> for LengthUnit {
    fn from(u: Unit) -> Self {
        match u {
            Unit::M => LengthUnit::Metre,
            Unit::Um => LengthUnit::Micrometre,
            Unit::Nm => LengthUnit::Nanometre,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Resona Ring Sweep");
            println!("=================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_sweep(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_spectrum {
                runner::write_spectrum_csv(&result, &out_dir.join("spectrum.csv"))?;
            }
            if job.output.save_resonances {
                runner::write_resonances_csv(&result, &out_dir.join("resonances.csv"))?;
            }
            if job.output.save_json {
                runner::write_summary_json(&result, &out_dir.join("summary.json"))?;
            }

            println!("Sweep complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            job.validate()?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Convert { value, from, to, unit } => {
            let converter = SpectralConverter::for_unit(unit.into());
            let result = converter.convert(value, from.into(), to.into())?;
            println!("{}", result);
            Ok(())
        }
        Commands::Resonances { min, max, length } => {
            let set = resona_core::resonances(min, max, length)?;
            if set.is_empty() {
                println!("No resonances in [{}, {}] for L = {}", min, max, length);
            }
            for (n, wl) in set.iter() {
                println!("{:>8}  {:.9}", n, wl);
            }
            Ok(())
        }
    }
}

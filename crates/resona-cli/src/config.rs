//! TOML configuration deserialisation for sweep jobs.

use anyhow::Context;
use serde::Deserialize;

use resona_core::units::LengthUnit;
use resona_core::{RingResonator, WavelengthGrid};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub ring: RingConfig,
    pub sweep: SweepConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Ring parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct RingConfig {
    /// Self-coupling coefficient σ in [0, 1].
    pub sigma: f64,
    /// Round-trip amplitude transmission in [0, 1].
    pub a: f64,
    /// Round-trip length, in `sweep.length_unit`.
    pub length: f64,
}

/// Spectral sweep parameters.
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    pub wavelengths: WavelengthSpec,
    /// Unit of every length in the job: "m", "um" or "nm". Default: "um".
    #[serde(default)]
    pub length_unit: LengthUnit,
}

/// Wavelength specification: either a range or explicit list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WavelengthSpec {
    Range {
        range: [f64; 2],
        #[serde(default = "default_points")]
        points: usize,
    },
    List {
        values: Vec<f64>,
    },
}

fn default_points() -> usize {
    1000
}

/// Resonance and quality-factor analysis.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisConfig {
    /// Quality factors are reported for the resonance nearest this
    /// wavelength. Default: centre of the sweep window.
    pub resonance_wavelength: Option<f64>,
    /// Free spectral range override (Hz). Default: c / L.
    pub fsr_frequency: Option<f64>,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the transmission spectrum as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_spectrum: bool,
    /// Whether to save the resonance list as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_resonances: bool,
    /// Whether to also save a JSON summary (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_spectrum: true,
            save_resonances: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Validated ring parameters.
    pub fn ring(&self) -> anyhow::Result<RingResonator> {
        RingResonator::new(self.ring.sigma, self.ring.a, self.ring.length)
            .context("Invalid [ring] section")
    }

    /// Validated sweep grid, `None` for an explicit wavelength list.
    pub fn grid(&self) -> anyhow::Result<Option<WavelengthGrid>> {
        match &self.sweep.wavelengths {
            WavelengthSpec::Range { range, points } => {
                let grid = WavelengthGrid::new(range[0], range[1], *points)
                    .context("Invalid [sweep] wavelength range")?;
                Ok(Some(grid))
            }
            WavelengthSpec::List { values } => {
                if values.is_empty() {
                    anyhow::bail!("[sweep] wavelength list is empty");
                }
                Ok(None)
            }
        }
    }

    /// Smallest and largest swept wavelength.
    pub fn window(&self) -> (f64, f64) {
        match &self.sweep.wavelengths {
            WavelengthSpec::Range { range, .. } => (range[0], range[1]),
            WavelengthSpec::List { values } => values.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), &v| (lo.min(v), hi.max(v)),
            ),
        }
    }

    /// Check everything that can be checked without running the sweep.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.ring()?;
        self.grid()?;
        if let Some(wl) = self.analysis.resonance_wavelength {
            if !(wl.is_finite() && wl > 0.0) {
                anyhow::bail!("analysis.resonance_wavelength must be positive, got {}", wl);
            }
        }
        if let Some(f) = self.analysis.fsr_frequency {
            if !(f.is_finite() && f > 0.0) {
                anyhow::bail!("analysis.fsr_frequency must be positive, got {}", f);
            }
        }
        Ok(())
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    parse_config(&content)
}

/// Parse a TOML job configuration.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    Ok(config)
}

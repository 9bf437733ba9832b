//! Sweep runner: ties together the ring model, resonance finder and figures of merit.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use resona_core::merit::{figures_of_merit, FiguresOfMerit};
use resona_core::units::{LengthUnit, SpectralConverter};
use resona_core::{resonances, ResonanceSet, RingResonator, TransmissionCurve, WavelengthGrid};

use crate::config::{JobConfig, WavelengthSpec};

/// Results from a sweep job.
#[derive(Debug, Serialize)]
pub struct SweepOutput {
    pub ring: RingResonator,
    pub length_unit: LengthUnit,
    pub spectrum: TransmissionCurve,
    pub resonances: ResonanceSet,
    /// Resonance used for the quality factors, as `(mode, wavelength)`.
    pub selected_resonance: Option<(u64, f64)>,
    pub figures_of_merit: FiguresOfMerit,
}

/// Run a full sweep from a parsed job configuration.
pub fn run_sweep(job: &JobConfig) -> Result<SweepOutput> {
    job.validate()?;
    let ring = job.ring()?;
    let unit = job.sweep.length_unit;
    let converter = SpectralConverter::for_unit(unit);

    let spectrum = match &job.sweep.wavelengths {
        WavelengthSpec::Range { range, points } => {
            let grid = WavelengthGrid::new(range[0], range[1], *points)?;
            println!(
                "  Sweeping {} points over [{}, {}] {}",
                grid.points,
                grid.min,
                grid.max,
                unit.symbol()
            );
            TransmissionCurve::sweep(&ring, &grid, &converter)?
        }
        WavelengthSpec::List { values } => {
            println!("  Evaluating {} explicit wavelengths", values.len());
            TransmissionCurve::at_wavelengths(&ring, values, &converter)?
        }
    };

    let (wl_min, wl_max) = job.window();
    let found = resonances(wl_min, wl_max, ring.length())
        .context("Resonance search failed")?;
    println!("  Resonances in window: {}", found.len());

    let target = job
        .analysis
        .resonance_wavelength
        .unwrap_or(0.5 * (wl_min + wl_max));
    let selected = found.nearest(target);
    let f_res = match selected {
        Some((n, wl)) => {
            log::info!("Quality factors at mode {} (λ = {} {})", n, wl, unit.symbol());
            Some(converter.frequency_from_wavelength(wl)?)
        }
        None => {
            log::warn!("No resonance in [{}, {}]; quality factors skipped", wl_min, wl_max);
            None
        }
    };

    let merit = figures_of_merit(&ring, &converter, f_res, job.analysis.fsr_frequency)
        .context("Figures of merit")?;

    print_summary(&merit, selected, unit);

    Ok(SweepOutput {
        ring,
        length_unit: unit,
        spectrum,
        resonances: found,
        selected_resonance: selected,
        figures_of_merit: merit,
    })
}

fn print_summary(merit: &FiguresOfMerit, selected: Option<(u64, f64)>, unit: LengthUnit) {
    println!("  T_max: {:.6}", merit.t_max);
    println!("  T_min: {:.6}", merit.t_min);
    println!(
        "  Extinction ratio: {:.3} ({:.2} dB)",
        merit.extinction_ratio, merit.extinction_ratio_db
    );
    println!("  Linewidth (fraction of FSR): {:.6}", merit.linewidth);
    println!("  FSR: {:.6e} rad/{} | {:.6e} Hz", merit.fsr_wavenumber, unit.symbol(), merit.fsr_frequency);
    println!("  FWHD: {:.6e} rad/{} | {:.6e} Hz", merit.fwhd_wavenumber, unit.symbol(), merit.fwhd_frequency);
    if let (Some(q), Some((n, wl))) = (merit.quality, selected) {
        println!("  Resonance n={} at {:.6} {} ({:.6e} Hz)", n, wl, unit.symbol(), q.resonance_frequency);
        println!("    Q_load: {:.4e}", q.q_load);
        println!("    Q_ext: {:.4e}", q.q_ext);
        println!("    Q_int: {:.4e}", q.q_intrinsic);
        println!("    Q_ring: {:.4e}", q.q_ring);
        println!("    Escape ratio: {:.4}", q.escape_ratio);
    }
}

/// Write the transmission spectrum to a CSV file with a metadata header.
pub fn write_spectrum_csv(output: &SweepOutput, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    let unit = output.length_unit.symbol();

    writeln!(file, "# Resona: All-Pass Ring Transmission Spectrum")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# sigma: {}, a: {}, length: {} {}",
        output.ring.sigma(),
        output.ring.a(),
        output.ring.length(),
        unit
    )?;
    writeln!(file, "#")?;
    writeln!(file, "wavelength_{},wavenumber_rad_per_{},frequency_hz,transmission", unit, unit)?;

    let s = &output.spectrum;
    for i in 0..s.len() {
        writeln!(
            file,
            "{:.9},{:.9e},{:.9e},{:.9e}",
            s.wavelengths[i], s.wavenumbers[i], s.frequencies[i], s.transmission[i]
        )?;
    }

    println!("Spectrum written to: {}", path.display());
    Ok(())
}

/// Write the resonance list to a CSV file.
pub fn write_resonances_csv(output: &SweepOutput, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let converter = SpectralConverter::for_unit(output.length_unit);
    let unit = output.length_unit.symbol();
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;
    writeln!(file, "mode,wavelength_{},frequency_hz", unit)?;
    for (n, wl) in output.resonances.iter() {
        writeln!(file, "{},{:.9},{:.9e}", n, wl, converter.frequency_from_wavelength(wl)?)?;
    }

    println!("Resonances written to: {}", path.display());
    Ok(())
}

/// Write the full sweep output to a JSON file.
pub fn write_summary_json(output: &SweepOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(output)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Summary (JSON) written to: {}", path.display());
    Ok(())
}

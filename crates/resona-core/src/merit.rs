//! Spectral figures of merit of an all-pass ring.
//!
//! All quantities are closed-form functions of the round-trip amplitude `a`,
//! the self-coupling σ and, where relevant, the round-trip length and a
//! resonance frequency:
//!
//! | Quantity | Expression |
//! |----------|------------|
//! | $T_{max}$ | $(a+\sigma)^2 / (1+a\sigma)^2$ |
//! | $T_{min}$ | $(a-\sigma)^2 / (1-a\sigma)^2$ |
//! | linewidth | $\frac{2}{\pi}\arcsin\frac{1-a\sigma}{\sqrt{2(1+a^2\sigma^2)}}$ (fraction of FSR) |
//! | $\Delta k_{FWHD}$ | $\frac{4}{L}\arccos\frac{1+a\sigma}{\sqrt{2(1+a^2\sigma^2)}}$ |
//! | $Q_{load}$ | $f_{res} / (\text{linewidth}(a,\sigma)\,\Delta f_{FSR})$ |
//! | $Q_{ext}$ | $f_{res} / (\text{linewidth}(1,\sigma)\,\Delta f_{FSR})$ |
//! | $Q_{int}$ | $f_{res} / (\text{linewidth}(a,1)\,\Delta f_{FSR})$ |
//! | $Q_{ring}$ | $1/Q_{ring} = 1/Q_{load} + 1/Q_{ext}$ |
//! | escape ratio | $Q_{load} / Q_{ext}$ |
//!
//! Out-of-range coefficients are rejected, never clamped. Values that are
//! genuinely unbounded are returned as `f64::INFINITY`: the extinction ratio
//! at critical coupling (`a = σ`), `Q_ext` of an uncoupled ring (`σ = 1`) and
//! `Q_int` of a lossless ring (`a = 1`). A ring with `a·σ = 1` has no loss
//! channel at all and is rejected, as is the extinction ratio of an opaque
//! ring (`a = σ = 0`), where both extremes vanish.

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::{check_positive, check_unit_interval, Result, RingError};
use crate::types::RingResonator;
use crate::units::SpectralConverter;

/// `a·σ = 1` leaves nothing to define a resonance width or depth.
fn check_lossy(a: f64, sigma: f64) -> Result<()> {
    if a * sigma >= 1.0 {
        return Err(RingError::InvalidParameter {
            name: "a * sigma",
            value: a * sigma,
            reason: "a lossless, uncoupled ring has no resonance dip",
        });
    }
    Ok(())
}

fn check_coefficients(a: f64, sigma: f64) -> Result<(f64, f64)> {
    Ok((check_unit_interval("a", a)?, check_unit_interval("sigma", sigma)?))
}

/// Off-resonance (maximum) transmission.
pub fn t_max(a: f64, sigma: f64) -> Result<f64> {
    let (a, sigma) = check_coefficients(a, sigma)?;
    Ok((a + sigma).powi(2) / (1.0 + a * sigma).powi(2))
}

/// On-resonance (minimum) transmission.
pub fn t_min(a: f64, sigma: f64) -> Result<f64> {
    let (a, sigma) = check_coefficients(a, sigma)?;
    check_lossy(a, sigma)?;
    Ok((a - sigma).powi(2) / (1.0 - a * sigma).powi(2))
}

/// `T_max / T_min`; `f64::INFINITY` at critical coupling where `T_min = 0`.
///
/// `a = σ = 0` transmits nothing at any wavelength and is rejected.
pub fn extinction_ratio(a: f64, sigma: f64) -> Result<f64> {
    let max = t_max(a, sigma)?;
    let min = t_min(a, sigma)?;
    if max == 0.0 && min == 0.0 {
        return Err(RingError::InvalidParameter {
            name: "a * sigma",
            value: a * sigma,
            reason: "an opaque ring (a = sigma = 0) has no resonance dip",
        });
    }
    if min == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(max / min)
}

/// Extinction ratio in decibels.
pub fn extinction_ratio_db(a: f64, sigma: f64) -> Result<f64> {
    Ok(10.0 * extinction_ratio(a, sigma)?.log10())
}

/// Full width at half depth as a fraction of the free spectral range.
pub fn linewidth(a: f64, sigma: f64) -> Result<f64> {
    let (a, sigma) = check_coefficients(a, sigma)?;
    Ok(linewidth_unchecked(a, sigma))
}

fn linewidth_unchecked(a: f64, sigma: f64) -> f64 {
    let x = a * sigma;
    let arg = ((1.0 - x) / (2.0 * (1.0 + x * x)).sqrt()).clamp(0.0, 1.0);
    (2.0 / PI) * arg.asin()
}

/// Free spectral range in wavenumber, $2\pi / L$.
pub fn fsr_wavenumber(length: f64) -> Result<f64> {
    Ok(2.0 * PI / check_positive("length", length)?)
}

/// Free spectral range in frequency, $c / L$.
pub fn fsr_frequency(length: f64, converter: &SpectralConverter) -> Result<f64> {
    Ok(converter.speed_of_light() / check_positive("length", length)?)
}

/// Full width at half depth in wavenumber.
pub fn fwhd_wavenumber(a: f64, sigma: f64, length: f64) -> Result<f64> {
    let (a, sigma) = check_coefficients(a, sigma)?;
    let length = check_positive("length", length)?;
    let x = a * sigma;
    let arg = ((1.0 + x) / (2.0 * (1.0 + x * x)).sqrt()).clamp(0.0, 1.0);
    Ok(4.0 / length * arg.acos())
}

/// Full width at half depth in frequency, $c\,\Delta k / 2\pi$.
pub fn fwhd_frequency(a: f64, sigma: f64, length: f64, converter: &SpectralConverter) -> Result<f64> {
    Ok(converter.speed_of_light() * fwhd_wavenumber(a, sigma, length)? / (2.0 * PI))
}

fn quality(width_fraction: f64, f_res: f64, f_fsr: f64) -> f64 {
    if width_fraction == 0.0 {
        f64::INFINITY
    } else {
        f_res / (width_fraction * f_fsr)
    }
}

fn check_frequencies(f_res: f64, f_fsr: f64) -> Result<(f64, f64)> {
    Ok((
        check_positive("resonance_frequency", f_res)?,
        check_positive("fsr_frequency", f_fsr)?,
    ))
}

/// Loaded quality factor.
pub fn q_load(a: f64, sigma: f64, f_res: f64, f_fsr: f64) -> Result<f64> {
    let (a, sigma) = check_coefficients(a, sigma)?;
    check_lossy(a, sigma)?;
    let (f_res, f_fsr) = check_frequencies(f_res, f_fsr)?;
    Ok(quality(linewidth_unchecked(a, sigma), f_res, f_fsr))
}

/// External (coupling-limited) quality factor; infinite for σ = 1.
pub fn q_ext(sigma: f64, f_res: f64, f_fsr: f64) -> Result<f64> {
    let sigma = check_unit_interval("sigma", sigma)?;
    let (f_res, f_fsr) = check_frequencies(f_res, f_fsr)?;
    Ok(quality(linewidth_unchecked(1.0, sigma), f_res, f_fsr))
}

/// Intrinsic (loss-limited) quality factor; infinite for a = 1.
pub fn q_intrinsic(a: f64, f_res: f64, f_fsr: f64) -> Result<f64> {
    let a = check_unit_interval("a", a)?;
    let (f_res, f_fsr) = check_frequencies(f_res, f_fsr)?;
    Ok(quality(linewidth_unchecked(a, 1.0), f_res, f_fsr))
}

/// Combined ring quality factor, $1/Q_{ring} = 1/Q_{load} + 1/Q_{ext}$.
pub fn q_ring(a: f64, sigma: f64, f_res: f64, f_fsr: f64) -> Result<f64> {
    let load = q_load(a, sigma, f_res, f_fsr)?;
    let ext = q_ext(sigma, f_res, f_fsr)?;
    Ok(1.0 / (1.0 / load + 1.0 / ext))
}

/// Fraction of the loaded decay rate that escapes through the bus, $Q_{load}/Q_{ext}$.
pub fn escape_ratio(a: f64, sigma: f64, f_res: f64, f_fsr: f64) -> Result<f64> {
    let load = q_load(a, sigma, f_res, f_fsr)?;
    let ext = q_ext(sigma, f_res, f_fsr)?;
    Ok(load / ext)
}

/// Quality factors at one resonance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityFactors {
    /// Resonance frequency (Hz).
    pub resonance_frequency: f64,
    /// Free spectral range used for the widths (Hz).
    pub fsr_frequency: f64,
    pub q_load: f64,
    pub q_ext: f64,
    pub q_intrinsic: f64,
    pub q_ring: f64,
    pub escape_ratio: f64,
}

/// Every figure of merit of a ring. Infinite values serialise to JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiguresOfMerit {
    pub t_max: f64,
    pub t_min: f64,
    pub extinction_ratio: f64,
    pub extinction_ratio_db: f64,
    /// Full width at half depth as a fraction of the FSR.
    pub linewidth: f64,
    /// Free spectral range (rad per length unit).
    pub fsr_wavenumber: f64,
    /// Free spectral range (Hz).
    pub fsr_frequency: f64,
    /// Full width at half depth (rad per length unit).
    pub fwhd_wavenumber: f64,
    /// Full width at half depth (Hz).
    pub fwhd_frequency: f64,
    /// Present when a resonance frequency was supplied.
    pub quality: Option<QualityFactors>,
}

/// Evaluate every figure of merit for `ring`.
///
/// Quality factors need `resonance_frequency`; `fsr_frequency` defaults to
/// `c / L` from the converter.
pub fn figures_of_merit(
    ring: &RingResonator,
    converter: &SpectralConverter,
    resonance_frequency: Option<f64>,
    fsr_frequency_override: Option<f64>,
) -> Result<FiguresOfMerit> {
    let (a, sigma, length) = (ring.a(), ring.sigma(), ring.length());
    check_lossy(a, sigma)?;

    let f_fsr = match fsr_frequency_override {
        Some(f) => check_positive("fsr_frequency", f)?,
        None => fsr_frequency(length, converter)?,
    };

    let quality = match resonance_frequency {
        Some(f_res) => Some(QualityFactors {
            resonance_frequency: f_res,
            fsr_frequency: f_fsr,
            q_load: q_load(a, sigma, f_res, f_fsr)?,
            q_ext: q_ext(sigma, f_res, f_fsr)?,
            q_intrinsic: q_intrinsic(a, f_res, f_fsr)?,
            q_ring: q_ring(a, sigma, f_res, f_fsr)?,
            escape_ratio: escape_ratio(a, sigma, f_res, f_fsr)?,
        }),
        None => None,
    };

    Ok(FiguresOfMerit {
        t_max: t_max(a, sigma)?,
        t_min: t_min(a, sigma)?,
        extinction_ratio: extinction_ratio(a, sigma)?,
        extinction_ratio_db: extinction_ratio_db(a, sigma)?,
        linewidth: linewidth(a, sigma)?,
        fsr_wavenumber: fsr_wavenumber(length)?,
        fsr_frequency: f_fsr,
        fwhd_wavenumber: fwhd_wavenumber(a, sigma, length)?,
        fwhd_frequency: fwhd_frequency(a, sigma, length, converter)?,
        quality,
    })
}

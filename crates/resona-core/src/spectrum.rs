//! Transmission sweeps over a wavelength grid.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{check_positive, Result, RingError};
use crate::types::RingResonator;
use crate::units::{SpectralConverter, SpectralQuantity};

/// Linearly spaced, ascending wavelength grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavelengthGrid {
    pub min: f64,
    pub max: f64,
    pub points: usize,
}

impl WavelengthGrid {
    /// Create a grid, requiring `0 < min < max` and at least two points.
    pub fn new(min: f64, max: f64, points: usize) -> Result<Self> {
        let grid = Self { min, max, points };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("wavelength_min", self.min)?;
        check_positive("wavelength_max", self.max)?;
        if self.max <= self.min {
            return Err(RingError::InvalidParameter {
                name: "wavelength_max",
                value: self.max,
                reason: "must be larger than wavelength_min",
            });
        }
        if self.points < 2 {
            return Err(RingError::InvalidParameter {
                name: "points",
                value: self.points as f64,
                reason: "a sweep needs at least two points",
            });
        }
        Ok(())
    }

    /// Grid wavelengths, endpoints included.
    pub fn wavelengths(&self) -> Array1<f64> {
        Array1::linspace(self.min, self.max, self.points)
    }

    /// Wavelength spacing between adjacent points.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.points - 1) as f64
    }
}

/// Transmission sampled on a wavelength grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionCurve {
    pub wavelengths: Vec<f64>,
    pub wavenumbers: Vec<f64>,
    /// Hz.
    pub frequencies: Vec<f64>,
    pub transmission: Vec<f64>,
}

impl TransmissionCurve {
    /// Evaluate `ring` on every point of `grid`.
    pub fn sweep(
        ring: &RingResonator,
        grid: &WavelengthGrid,
        converter: &SpectralConverter,
    ) -> Result<Self> {
        grid.validate()?;
        Self::evaluate(ring, grid.wavelengths(), converter)
    }

    /// Evaluate `ring` at explicit wavelengths. They are sorted ascending
    /// first; duplicates are kept.
    pub fn at_wavelengths(
        ring: &RingResonator,
        wavelengths: &[f64],
        converter: &SpectralConverter,
    ) -> Result<Self> {
        let mut sorted = wavelengths.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::evaluate(ring, Array1::from_vec(sorted), converter)
    }

    fn evaluate(
        ring: &RingResonator,
        wavelengths: Array1<f64>,
        converter: &SpectralConverter,
    ) -> Result<Self> {
        let wavenumbers = converter.convert_array(
            &wavelengths,
            SpectralQuantity::Wavelength,
            SpectralQuantity::Wavenumber,
        )?;
        let frequencies = converter.convert_array(
            &wavelengths,
            SpectralQuantity::Wavelength,
            SpectralQuantity::Frequency,
        )?;
        let transmission = ring.transmission_array(&wavenumbers)?;

        log::debug!(
            "Evaluated {} points (sigma={}, a={}, L={})",
            wavelengths.len(),
            ring.sigma(),
            ring.a(),
            ring.length()
        );

        Ok(Self {
            wavelengths: wavelengths.to_vec(),
            wavenumbers: wavenumbers.to_vec(),
            frequencies: frequencies.to_vec(),
            transmission: transmission.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// `(wavelength, transmission)` pairs in ascending wavelength.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelengths.iter().copied().zip(self.transmission.iter().copied())
    }

    /// Deepest sampled point as `(wavelength, transmission)`.
    pub fn minimum(&self) -> Option<(f64, f64)> {
        self.points().fold(None, |best, (wl, t)| match best {
            Some((_, best_t)) if best_t <= t => best,
            _ => Some((wl, t)),
        })
    }
}

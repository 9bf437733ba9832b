//! Conversions between wavelength, wavenumber and frequency.
//!
//! The only physical constant involved is the vacuum speed of light. It is
//! carried explicitly by a [`SpectralConverter`] rather than read from a
//! global, so that the same kernel serves lengths in metres, micrometres or
//! nanometres:
//!
//! - $k = 2\pi / \lambda$
//! - $f = c / \lambda$
//! - $f = c k / 2\pi$
//!
//! Every conversion rejects zero with [`RingError::DivisionByZero`] and
//! negative or non-finite values with [`RingError::InvalidParameter`], so a
//! forward conversion and its inverse accept exactly the same domain.

use std::f64::consts::PI;

use ndarray::{Array, Dimension};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RingError};

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Length unit in which wavelengths and ring lengths are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "m")]
    Metre,
    #[default]
    #[serde(rename = "um")]
    Micrometre,
    #[serde(rename = "nm")]
    Nanometre,
}

impl LengthUnit {
    /// Number of metres in one unit.
    pub fn metres(self) -> f64 {
        match self {
            Self::Metre => 1.0,
            Self::Micrometre => 1e-6,
            Self::Nanometre => 1e-9,
        }
    }

    /// Speed of light expressed in this unit per second.
    pub fn speed_of_light(self) -> f64 {
        SPEED_OF_LIGHT / self.metres()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Metre => "m",
            Self::Micrometre => "um",
            Self::Nanometre => "nm",
        }
    }
}

/// A spectral coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpectralQuantity {
    /// λ, in the converter's length unit.
    Wavelength,
    /// k = 2π/λ, in radians per length unit.
    Wavenumber,
    /// f = c/λ, in Hz.
    Frequency,
}

impl SpectralQuantity {
    fn name(self) -> &'static str {
        match self {
            Self::Wavelength => "wavelength",
            Self::Wavenumber => "wavenumber",
            Self::Frequency => "frequency",
        }
    }
}

/// Converts between spectral coordinates for a given speed of light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralConverter {
    c: f64,
}

impl Default for SpectralConverter {
    fn default() -> Self {
        Self::for_unit(LengthUnit::default())
    }
}

impl SpectralConverter {
    /// Build a converter from an explicit speed of light (length units per second).
    pub fn new(speed_of_light: f64) -> Result<Self> {
        let c = check_domain("speed_of_light", speed_of_light)?;
        Ok(Self { c })
    }

    /// Converter whose lengths are expressed in `unit`.
    pub fn for_unit(unit: LengthUnit) -> Self {
        Self { c: unit.speed_of_light() }
    }

    pub fn speed_of_light(&self) -> f64 {
        self.c
    }

    pub fn wavenumber_from_wavelength(&self, wavelength: f64) -> Result<f64> {
        Ok(2.0 * PI / check_domain("wavelength", wavelength)?)
    }

    pub fn wavelength_from_wavenumber(&self, k: f64) -> Result<f64> {
        Ok(2.0 * PI / check_domain("wavenumber", k)?)
    }

    pub fn frequency_from_wavelength(&self, wavelength: f64) -> Result<f64> {
        Ok(self.c / check_domain("wavelength", wavelength)?)
    }

    pub fn wavelength_from_frequency(&self, frequency: f64) -> Result<f64> {
        Ok(self.c / check_domain("frequency", frequency)?)
    }

    pub fn frequency_from_wavenumber(&self, k: f64) -> Result<f64> {
        Ok(self.c * check_domain("wavenumber", k)? / (2.0 * PI))
    }

    pub fn wavenumber_from_frequency(&self, frequency: f64) -> Result<f64> {
        Ok(2.0 * PI * check_domain("frequency", frequency)? / self.c)
    }

    /// Convert `value` from one spectral coordinate to another.
    pub fn convert(&self, value: f64, from: SpectralQuantity, to: SpectralQuantity) -> Result<f64> {
        use SpectralQuantity::*;
        match (from, to) {
            (Wavelength, Wavenumber) => self.wavenumber_from_wavelength(value),
            (Wavelength, Frequency) => self.frequency_from_wavelength(value),
            (Wavenumber, Wavelength) => self.wavelength_from_wavenumber(value),
            (Wavenumber, Frequency) => self.frequency_from_wavenumber(value),
            (Frequency, Wavelength) => self.wavelength_from_frequency(value),
            (Frequency, Wavenumber) => self.wavenumber_from_frequency(value),
            (same, _) => check_domain(same.name(), value),
        }
    }

    /// Elementwise [`convert`](Self::convert); the output has the input's shape.
    pub fn convert_array<D: Dimension>(
        &self,
        values: &Array<f64, D>,
        from: SpectralQuantity,
        to: SpectralQuantity,
    ) -> Result<Array<f64, D>> {
        let mut out = Array::zeros(values.raw_dim());
        for (o, &v) in out.iter_mut().zip(values.iter()) {
            *o = self.convert(v, from, to)?;
        }
        Ok(out)
    }
}

/// Spectral coordinates live on the positive reals.
fn check_domain(name: &'static str, value: f64) -> Result<f64> {
    if value == 0.0 {
        return Err(RingError::DivisionByZero { quantity: name });
    }
    if !value.is_finite() || value < 0.0 {
        return Err(RingError::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_telecom_wavelength_in_micrometres() {
        let conv = SpectralConverter::for_unit(LengthUnit::Micrometre);
        let f = conv.frequency_from_wavelength(1.55).unwrap();
        // 1550 nm sits at ~193.4 THz.
        assert_relative_eq!(f, 193.414_489e12, max_relative = 1e-6);
    }

    #[test]
    fn test_unit_choice_does_not_change_frequency() {
        let f_um = SpectralConverter::for_unit(LengthUnit::Micrometre)
            .frequency_from_wavelength(1.55)
            .unwrap();
        let f_nm = SpectralConverter::for_unit(LengthUnit::Nanometre)
            .frequency_from_wavelength(1550.0)
            .unwrap();
        let f_m = SpectralConverter::for_unit(LengthUnit::Metre)
            .frequency_from_wavelength(1.55e-6)
            .unwrap();
        assert_relative_eq!(f_um, f_nm, max_relative = 1e-12);
        assert_relative_eq!(f_um, f_m, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_is_division_by_zero_everywhere() {
        let conv = SpectralConverter::default();
        use SpectralQuantity::*;
        for from in [Wavelength, Wavenumber, Frequency] {
            for to in [Wavelength, Wavenumber, Frequency] {
                assert!(
                    matches!(conv.convert(0.0, from, to), Err(RingError::DivisionByZero { .. })),
                    "{:?} -> {:?} accepted zero",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        let conv = SpectralConverter::default();
        assert!(matches!(
            conv.wavenumber_from_wavelength(-1.0),
            Err(RingError::InvalidParameter { .. })
        ));
        assert!(matches!(
            conv.frequency_from_wavenumber(f64::NAN),
            Err(RingError::InvalidParameter { .. })
        ));
        assert!(SpectralConverter::new(0.0).is_err());
    }

    #[test]
    fn test_convert_array_keeps_shape() {
        let conv = SpectralConverter::default();
        let wl = array![[1.5, 1.55], [1.6, 1.65]];
        let k = conv
            .convert_array(&wl, SpectralQuantity::Wavelength, SpectralQuantity::Wavenumber)
            .unwrap();
        assert_eq!(k.shape(), &[2, 2]);
        assert_relative_eq!(k[[1, 0]], 2.0 * PI / 1.6, max_relative = 1e-15);
    }
}

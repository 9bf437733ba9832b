//! # Resona Core
//!
//! Closed-form spectral model of an all-pass ring resonator: a waveguide loop
//! side-coupled to a single bus waveguide. Everything in this crate is a pure
//! function of the ring parameters and the spectral coordinate; there is no
//! hidden state and no I/O.
//!
//! ## Modules
//!
//! - [`types`]: Ring parameters and validation.
//! - [`units`]: Wavelength / wavenumber / frequency conversions.
//! - [`transmission`]: Power transmission and complex field response.
//! - [`resonance`]: Resonant modes inside a wavelength window.
//! - [`merit`]: Extinction ratio, linewidth, quality factors.
//! - [`spectrum`]: Transmission sweeps over a wavelength grid.
//! - [`error`]: The shared error type.

pub mod error;
pub mod merit;
pub mod resonance;
pub mod spectrum;
pub mod transmission;
pub mod types;
pub mod units;

pub use error::{Result, RingError};
pub use merit::{figures_of_merit, FiguresOfMerit, QualityFactors};
pub use resonance::{resonances, ResonanceSet};
pub use spectrum::{TransmissionCurve, WavelengthGrid};
pub use transmission::{transmission, transmission_phase, RoundTripPhase};
pub use types::RingResonator;
pub use units::{LengthUnit, SpectralConverter, SpectralQuantity, SPEED_OF_LIGHT};

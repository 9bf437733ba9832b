//! Core types shared across the Resona workspace.
//!
//! A ring is described by three numbers: the self-coupling coefficient of the
//! bus coupler, the round-trip amplitude transmission of the loop, and the
//! round-trip length. Lengths are unit-agnostic; pair them with a
//! [`SpectralConverter`](crate::units::SpectralConverter) built for the same
//! [`LengthUnit`](crate::units::LengthUnit) whenever frequencies are involved.

use serde::Serialize;

use crate::error::{check_positive, check_unit_interval, Result};

/// Parameters of a single-bus (all-pass) ring resonator.
///
/// Fields are private so that every instance has passed validation:
/// `sigma` and `a` lie in `[0, 1]` and `length` is finite and positive.
/// Only `Serialize` is derived; parsed values go through [`RingResonator::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingResonator {
    /// Self-coupling coefficient σ: field fraction remaining in the bus.
    sigma: f64,
    /// Round-trip amplitude transmission `a` (1 = lossless).
    a: f64,
    /// Round-trip length L.
    length: f64,
}

impl RingResonator {
    /// Create a ring, rejecting out-of-range coefficients or a non-positive length.
    pub fn new(sigma: f64, a: f64, length: f64) -> Result<Self> {
        Ok(Self {
            sigma: check_unit_interval("sigma", sigma)?,
            a: check_unit_interval("a", a)?,
            length: check_positive("length", length)?,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Product σ·a, which appears in every closed-form expression.
    pub fn sigma_a(&self) -> f64 {
        self.sigma * self.a
    }

    /// Whether the ring is critically coupled (σ = a), i.e. the resonance dip
    /// reaches zero transmission.
    pub fn is_critically_coupled(&self) -> bool {
        self.sigma == self.a
    }

    /// Coupling regime relative to the round-trip loss.
    pub fn coupling_regime(&self) -> CouplingRegime {
        if self.sigma < self.a {
            CouplingRegime::Over
        } else if self.sigma > self.a {
            CouplingRegime::Under
        } else {
            CouplingRegime::Critical
        }
    }
}

/// Coupling regime of an all-pass ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouplingRegime {
    /// Coupling loss exceeds round-trip loss (σ < a).
    Over,
    /// Coupling loss equals round-trip loss (σ = a).
    Critical,
    /// Round-trip loss exceeds coupling loss (σ > a).
    Under,
}

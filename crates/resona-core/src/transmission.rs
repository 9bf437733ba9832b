//! Steady-state transmission of an all-pass ring resonator.
//!
//! For self-coupling σ, round-trip amplitude `a` and round-trip phase θ, the
//! through-port field is
//!
//! $$ t(\theta) = \frac{\sigma - a e^{i\theta}}{1 - \sigma a e^{i\theta}} $$
//!
//! and the power transmission $T = |t|^2$ takes the closed form
//!
//! $$ T = \frac{(\sigma + a)^2 - 4\sigma a \cos^2(\theta/2)}
//!             {(1 + \sigma a)^2 - 4\sigma a \cos^2(\theta/2)} $$
//!
//! With θ = kL this is the wavenumber form. The phase form splits θ into a
//! propagation phase φ₀, a loss-related phase φₐ and a coupler phase φ_σ, and
//! uses θ = φ₀ + φₐ − φ_σ in the numerator and the denominator alike.
//!
//! Resonance (θ = 2πn) gives the dip $T_{min} = (\sigma-a)^2/(1-\sigma a)^2$;
//! anti-resonance (θ = (2n+1)π) gives $T_{max} = (\sigma+a)^2/(1+\sigma a)^2$.

use ndarray::{Array, Dimension, Zip};
use num_complex::Complex64;

use crate::error::{check_finite, Result, RingError};
use crate::types::RingResonator;

/// The three phase contributions accumulated over one round trip (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoundTripPhase {
    /// Propagation phase φ₀ (kL for a uniform waveguide).
    pub propagation: f64,
    /// Phase associated with the round-trip loss, φₐ.
    pub loss: f64,
    /// Phase picked up at the coupler, φ_σ.
    pub coupling: f64,
}

impl RoundTripPhase {
    /// Pure propagation phase, no coupler or loss phase.
    pub fn propagation(phi: f64) -> Self {
        Self { propagation: phi, ..Default::default() }
    }

    /// Effective round-trip phase θ = φ₀ + φₐ − φ_σ.
    pub fn total(&self) -> f64 {
        self.propagation + self.loss - self.coupling
    }
}

impl RingResonator {
    /// Round-trip propagation phase kL at wavenumber `k`.
    pub fn round_trip_phase(&self, k: f64) -> f64 {
        k * self.length()
    }

    /// Power transmission for a total round-trip phase θ.
    pub fn transmission_at_phase(&self, theta: f64) -> Result<f64> {
        let theta = check_finite("phase", theta)?;
        let (sigma, a) = (self.sigma(), self.a());
        let sa4 = 4.0 * sigma * a;
        let cos2 = (theta / 2.0).cos().powi(2);

        let numerator = (sigma + a).powi(2) - sa4 * cos2;
        let denominator = (1.0 + sigma * a).powi(2) - sa4 * cos2;
        // Bounded below by (1 - σa)², so zero only for σa = 1 on resonance.
        if denominator <= 0.0 {
            return Err(RingError::DivisionByZero {
                quantity: "transmission denominator (sigma * a = 1 on resonance)",
            });
        }
        Ok(numerator / denominator)
    }

    /// Power transmission at wavenumber `k` (wavenumber form).
    pub fn transmission(&self, k: f64) -> Result<f64> {
        let k = check_finite("wavenumber", k)?;
        self.transmission_at_phase(self.round_trip_phase(k))
    }

    /// Power transmission for separate phase contributions (phase form).
    pub fn transmission_phase(&self, phase: RoundTripPhase) -> Result<f64> {
        self.transmission_at_phase(phase.total())
    }

    /// Elementwise [`transmission`](Self::transmission) over an array of
    /// wavenumbers of any shape.
    pub fn transmission_array<D: Dimension>(&self, k: &Array<f64, D>) -> Result<Array<f64, D>> {
        let mut out = Array::zeros(k.raw_dim());
        for (t, &k) in out.iter_mut().zip(k.iter()) {
            *t = self.transmission(k)?;
        }
        Ok(out)
    }

    /// Elementwise phase form over three same-shaped phase arrays.
    pub fn transmission_phase_array<D: Dimension>(
        &self,
        propagation: &Array<f64, D>,
        loss: &Array<f64, D>,
        coupling: &Array<f64, D>,
    ) -> Result<Array<f64, D>> {
        for other in [loss, coupling] {
            if other.shape() != propagation.shape() {
                return Err(RingError::ShapeMismatch {
                    expected: propagation.shape().to_vec(),
                    found: other.shape().to_vec(),
                });
            }
        }

        let mut out = Array::zeros(propagation.raw_dim());
        let mut failure = None;
        Zip::from(&mut out)
            .and(propagation)
            .and(loss)
            .and(coupling)
            .for_each(|t, &p0, &pa, &ps| {
                if failure.is_some() {
                    return;
                }
                let phase = RoundTripPhase { propagation: p0, loss: pa, coupling: ps };
                match self.transmission_phase(phase) {
                    Ok(value) => *t = value,
                    Err(e) => failure = Some(e),
                }
            });

        match failure {
            Some(e) => Err(e),
            None => Ok(out),
        }
    }

    /// Complex through-port field ratio $t = E_{out}/E_{in}$ at round-trip phase θ.
    ///
    /// `|t|²` equals [`transmission_at_phase`](Self::transmission_at_phase);
    /// `arg t` is the phase response of the ring.
    pub fn field_response(&self, theta: f64) -> Result<Complex64> {
        let theta = check_finite("phase", theta)?;
        let (sigma, a) = (self.sigma(), self.a());
        let round_trip = Complex64::from_polar(a, theta);
        let denominator = Complex64::from(1.0) - sigma * round_trip;
        if denominator.norm_sqr() == 0.0 {
            return Err(RingError::DivisionByZero {
                quantity: "field response denominator (sigma * a = 1 on resonance)",
            });
        }
        Ok((Complex64::from(sigma) - round_trip) / denominator)
    }

    /// Phase of the through-port field at wavenumber `k` (radians, in (-π, π]).
    pub fn phase_response(&self, k: f64) -> Result<f64> {
        let k = check_finite("wavenumber", k)?;
        Ok(self.field_response(self.round_trip_phase(k))?.arg())
    }
}

/// Power transmission of a ring with self-coupling `sigma`, round-trip
/// amplitude `a` and round-trip length `length` at wavenumber `k`.
pub fn transmission(sigma: f64, a: f64, k: f64, length: f64) -> Result<f64> {
    RingResonator::new(sigma, a, length)?.transmission(k)
}

/// Phase-form transmission: θ = φ₀ + φₐ − φ_σ replaces kL.
pub fn transmission_phase(sigma: f64, a: f64, phi_0: f64, phi_a: f64, phi_sigma: f64) -> Result<f64> {
    // The phase form carries no length; any positive placeholder passes validation.
    let ring = RingResonator::new(sigma, a, 1.0)?;
    ring.transmission_phase(RoundTripPhase {
        propagation: phi_0,
        loss: phi_a,
        coupling: phi_sigma,
    })
}

/// Convenience for sweeping a wavenumber array with loose parameters.
pub fn transmission_array<D: Dimension>(
    sigma: f64,
    a: f64,
    k: &Array<f64, D>,
    length: f64,
) -> Result<Array<f64, D>> {
    RingResonator::new(sigma, a, length)?.transmission_array(k)
}

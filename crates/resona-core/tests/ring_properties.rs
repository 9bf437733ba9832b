//! Integration tests: analytic properties of the all-pass ring model.
//!
//! - Conversion round-trips for wavelength, wavenumber and frequency
//! - Periodicity of the transmission in kL
//! - Transmission at resonance and anti-resonance against T_min / T_max
//! - Half-depth points sit at ±FWHD/2 around each resonance
//! - Resonance window enumeration
//! - Critical coupling and idempotence of the figures of merit

use std::f64::consts::PI;

use approx::assert_relative_eq;

use resona_core::merit::{self, figures_of_merit};
use resona_core::transmission::{transmission, transmission_phase};
use resona_core::units::{LengthUnit, SpectralConverter, SpectralQuantity};
use resona_core::{resonances, RingError, RingResonator, TransmissionCurve, WavelengthGrid};

// ─────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────

const COUPLINGS: [(f64, f64); 5] = [(0.5, 0.8), (0.8, 0.8), (0.9, 0.5), (0.99, 0.95), (0.0, 0.6)];

fn micrometres() -> SpectralConverter {
    SpectralConverter::for_unit(LengthUnit::Micrometre)
}

// ─────────────────────────────────────────────────────────────
// Unit conversions
// ─────────────────────────────────────────────────────────────

#[test]
fn test_wavelength_round_trips() {
    let conv = micrometres();
    for &wl in &[1e-3, 0.4, 1.31, 1.55, 7.0, 1e4] {
        let k = conv.wavenumber_from_wavelength(wl).unwrap();
        assert_relative_eq!(conv.wavelength_from_wavenumber(k).unwrap(), wl, max_relative = 1e-15);

        let f = conv.frequency_from_wavelength(wl).unwrap();
        assert_relative_eq!(conv.wavelength_from_frequency(f).unwrap(), wl, max_relative = 1e-15);

        let k2 = conv.wavenumber_from_frequency(f).unwrap();
        assert_relative_eq!(k2, k, max_relative = 1e-14);
        assert_relative_eq!(conv.frequency_from_wavenumber(k2).unwrap(), f, max_relative = 1e-14);
    }
}

#[test]
fn test_generic_convert_agrees_with_named_conversions() {
    let conv = SpectralConverter::for_unit(LengthUnit::Nanometre);
    let wl = 1550.0;
    assert_eq!(
        conv.convert(wl, SpectralQuantity::Wavelength, SpectralQuantity::Frequency).unwrap(),
        conv.frequency_from_wavelength(wl).unwrap()
    );
    assert_eq!(
        conv.convert(wl, SpectralQuantity::Wavelength, SpectralQuantity::Wavelength).unwrap(),
        wl
    );
}

#[test]
fn test_explicit_speed_of_light() {
    // Natural units: c = 1, so f = 1/λ.
    let conv = SpectralConverter::new(1.0).unwrap();
    assert_relative_eq!(conv.frequency_from_wavelength(4.0).unwrap(), 0.25);
    assert_relative_eq!(conv.frequency_from_wavenumber(2.0 * PI).unwrap(), 1.0);
}

// ─────────────────────────────────────────────────────────────
// Transmission
// ─────────────────────────────────────────────────────────────

#[test]
fn test_transmission_is_periodic_in_kl() {
    let length = 37.0;
    for &(sigma, a) in &COUPLINGS {
        for i in 0..25 {
            let k = 0.1 + 0.37 * i as f64;
            let shifted = k + 2.0 * PI / length;
            let t0 = transmission(sigma, a, k, length).unwrap();
            let t1 = transmission(sigma, a, shifted, length).unwrap();
            assert_relative_eq!(t0, t1, max_relative = 1e-9, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_transmission_at_resonance_is_t_min() {
    let length = 300.0;
    for &(sigma, a) in &COUPLINGS {
        let expected = merit::t_min(a, sigma).unwrap();
        for n in [1u32, 7, 194] {
            let k = 2.0 * PI * n as f64 / length;
            let t = transmission(sigma, a, k, length).unwrap();
            assert_relative_eq!(t, expected, max_relative = 1e-9, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_transmission_at_anti_resonance_is_t_max() {
    let length = 300.0;
    for &(sigma, a) in &COUPLINGS {
        let expected = merit::t_max(a, sigma).unwrap();
        let k = PI * 15.0 / length;
        let t = transmission(sigma, a, k, length).unwrap();
        assert_relative_eq!(t, expected, max_relative = 1e-9);
        assert_relative_eq!(
            t,
            (sigma + a).powi(2) / (1.0 + sigma * a).powi(2),
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_transmission_stays_within_extremes() {
    let ring = RingResonator::new(0.7, 0.85, 10.0).unwrap();
    let lo = merit::t_min(ring.a(), ring.sigma()).unwrap();
    let hi = merit::t_max(ring.a(), ring.sigma()).unwrap();
    for i in 0..500 {
        let theta = 4.0 * PI * i as f64 / 499.0;
        let t = ring.transmission_at_phase(theta).unwrap();
        assert!(t >= lo - 1e-12 && t <= hi + 1e-12, "T({}) = {} outside [{}, {}]", theta, t, lo, hi);
    }
}

#[test]
fn test_half_depth_at_half_fwhd() {
    let length = 80.0;
    for &(sigma, a) in &COUPLINGS {
        if a == sigma {
            continue;
        }
        let ring = RingResonator::new(sigma, a, length).unwrap();
        let half_depth = 0.5 * (merit::t_max(a, sigma).unwrap() + merit::t_min(a, sigma).unwrap());
        let k_res = 2.0 * PI * 50.0 / length;
        let half_width = 0.5 * merit::fwhd_wavenumber(a, sigma, length).unwrap();
        for k in [k_res - half_width, k_res + half_width] {
            assert_relative_eq!(ring.transmission(k).unwrap(), half_depth, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_phase_form_matches_wavenumber_form() {
    let (sigma, a, length) = (0.6, 0.9, 25.0);
    for i in 0..20 {
        let k = 1.0 + 0.05 * i as f64;
        let t_k = transmission(sigma, a, k, length).unwrap();
        let t_phi = transmission_phase(sigma, a, k * length, 0.0, 0.0).unwrap();
        assert_relative_eq!(t_k, t_phi, max_relative = 1e-12);
    }
}

// ─────────────────────────────────────────────────────────────
// Resonances
// ─────────────────────────────────────────────────────────────

#[test]
fn test_resonance_window_one_to_two() {
    let set = resonances(1.0, 2.0, 10.0).unwrap();
    let expected = [
        (5, 2.0),
        (6, 10.0 / 6.0),
        (7, 10.0 / 7.0),
        (8, 1.25),
        (9, 10.0 / 9.0),
        (10, 1.0),
    ];
    assert_eq!(set.len(), expected.len());
    for ((n, wl), (n_exp, wl_exp)) in set.iter().zip(expected) {
        assert_eq!(n, n_exp);
        assert_relative_eq!(wl, wl_exp, max_relative = 1e-15);
    }
    assert_relative_eq!(set.get(6).unwrap(), 1.6667, max_relative = 1e-4);
    assert_relative_eq!(set.get(7).unwrap(), 1.4286, max_relative = 1e-4);
}

#[test]
fn test_resonances_are_transmission_minima() {
    let ring = RingResonator::new(0.5, 0.8, 300.0).unwrap();
    let conv = micrometres();
    let set = resonances(1.54, 1.56, ring.length()).unwrap();
    let dip = merit::t_min(ring.a(), ring.sigma()).unwrap();
    for wl in set.wavelengths() {
        let k = conv.wavenumber_from_wavelength(wl).unwrap();
        assert_relative_eq!(ring.transmission(k).unwrap(), dip, max_relative = 1e-6, epsilon = 1e-9);
    }
}

#[test]
fn test_recomputed_per_query() {
    let a = resonances(1.0, 2.0, 10.0).unwrap();
    let b = resonances(1.0, 2.0, 10.0).unwrap();
    assert_eq!(a, b);
    assert!(resonances(1.3, 1.4, 10.0).unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────
// Figures of merit
// ─────────────────────────────────────────────────────────────

#[test]
fn test_critical_coupling_does_not_crash() {
    let ring = RingResonator::new(0.8, 0.8, 300.0).unwrap();
    let fom = figures_of_merit(&ring, &micrometres(), None, None).unwrap();
    assert!(fom.t_min.abs() < 1e-12);
    assert!(fom.extinction_ratio.is_infinite());
    assert!(!fom.extinction_ratio.is_nan());
}

#[test]
fn test_figures_of_merit_idempotent() {
    let ring = RingResonator::new(0.5, 0.8, 300.0).unwrap();
    let conv = micrometres();
    let f_res = conv.frequency_from_wavelength(1.55).unwrap();
    let first = figures_of_merit(&ring, &conv, Some(f_res), None).unwrap();
    let second = figures_of_merit(&ring, &conv, Some(f_res), None).unwrap();
    assert_eq!(first.t_max.to_bits(), second.t_max.to_bits());
    assert_eq!(first.linewidth.to_bits(), second.linewidth.to_bits());
    let (q1, q2) = (first.quality.unwrap(), second.quality.unwrap());
    assert_eq!(q1.q_load.to_bits(), q2.q_load.to_bits());
    assert_eq!(q1.q_ring.to_bits(), q2.q_ring.to_bits());
}

#[test]
fn test_quality_factor_relations() {
    let ring = RingResonator::new(0.95, 0.98, 300.0).unwrap();
    let conv = micrometres();
    let f_res = conv.frequency_from_wavelength(1.55).unwrap();
    let fom = figures_of_merit(&ring, &conv, Some(f_res), None).unwrap();
    let q = fom.quality.unwrap();

    assert_relative_eq!(q.fsr_frequency, conv.speed_of_light() / 300.0, max_relative = 1e-15);
    // Q_load is the resonance frequency over the half-depth width.
    assert_relative_eq!(q.q_load, f_res / fom.fwhd_frequency, max_relative = 1e-9);
    assert_relative_eq!(1.0 / q.q_ring, 1.0 / q.q_load + 1.0 / q.q_ext, max_relative = 1e-12);
    assert_relative_eq!(q.escape_ratio, q.q_load / q.q_ext, max_relative = 1e-12);
    assert!(q.q_load < q.q_ext && q.q_load < q.q_intrinsic);
    assert!(q.escape_ratio > 0.0 && q.escape_ratio < 1.0);
}

#[test]
fn test_fsr_override() {
    let ring = RingResonator::new(0.5, 0.8, 300.0).unwrap();
    let fom = figures_of_merit(&ring, &micrometres(), Some(193e12), Some(2e11)).unwrap();
    assert_eq!(fom.fsr_frequency, 2e11);
    assert_eq!(fom.quality.unwrap().fsr_frequency, 2e11);
}

#[test]
fn test_rejects_lossless_uncoupled_ring() {
    let ring = RingResonator::new(1.0, 1.0, 300.0).unwrap();
    let err = figures_of_merit(&ring, &micrometres(), None, None).unwrap_err();
    assert!(matches!(err, RingError::InvalidParameter { .. }));
}

#[test]
fn test_summary_serialises() {
    let ring = RingResonator::new(0.5, 0.8, 50.0).unwrap();
    let fom = figures_of_merit(&ring, &micrometres(), Some(193e12), None).unwrap();
    let json = serde_json::to_string(&fom).expect("Serialisation failed");
    assert!(json.contains("\"q_load\""));

    let grid = WavelengthGrid::new(1.5, 1.6, 5).unwrap();
    let curve = TransmissionCurve::sweep(&ring, &grid, &micrometres()).unwrap();
    let json = serde_json::to_string(&curve).unwrap();
    assert!(json.contains("\"transmission\""));
}

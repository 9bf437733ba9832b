//! Resonant modes of a ring inside a wavelength window.
//!
//! The resonance condition $kL = 2\pi n$ places mode `n` at $\lambda_n = L/n$.
//! For a window $[\lambda_{min}, \lambda_{max}]$ the admissible modes are
//!
//! $$ n \in [\lceil L/\lambda_{max} \rceil, \lfloor L/\lambda_{min} \rfloor], \quad n \ge 1 $$
//!
//! Both window edges are inclusive.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{check_positive, Result, RingError};

/// Largest mode index that f64 still represents exactly.
const MAX_MODE: f64 = 9_007_199_254_740_992.0;

/// Resonant wavelengths keyed by mode index.
///
/// Iteration is in ascending mode index, i.e. descending wavelength.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResonanceSet {
    modes: BTreeMap<u64, f64>,
}

impl ResonanceSet {
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Resonant wavelength of mode `n`, if it lies in the window.
    pub fn get(&self, n: u64) -> Option<f64> {
        self.modes.get(&n).copied()
    }

    /// `(mode, wavelength)` pairs, ascending mode index.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.modes.iter().map(|(&n, &wl)| (n, wl))
    }

    pub fn modes(&self) -> Vec<u64> {
        self.modes.keys().copied().collect()
    }

    /// Wavelengths in mode order (descending).
    pub fn wavelengths(&self) -> Vec<f64> {
        self.modes.values().copied().collect()
    }

    /// The resonance closest to `wavelength`. Ties go to the lower mode.
    pub fn nearest(&self, wavelength: f64) -> Option<(u64, f64)> {
        self.iter().fold(None, |best, (n, wl)| match best {
            Some((_, best_wl)) if (best_wl - wavelength).abs() <= (wl - wavelength).abs() => best,
            _ => Some((n, wl)),
        })
    }
}

/// Enumerate every mode of a ring of round-trip length `length` whose
/// resonant wavelength lies in `[wavelength_min, wavelength_max]`.
///
/// A window without resonances yields an empty set.
pub fn resonances(wavelength_min: f64, wavelength_max: f64, length: f64) -> Result<ResonanceSet> {
    let wl_min = check_positive("wavelength_min", wavelength_min)?;
    let wl_max = check_positive("wavelength_max", wavelength_max)?;
    let length = check_positive("length", length)?;
    if wl_max < wl_min {
        return Err(RingError::InvalidParameter {
            name: "wavelength_max",
            value: wl_max,
            reason: "must not be smaller than wavelength_min",
        });
    }

    let n_lo = (length / wl_max).ceil();
    let n_hi = (length / wl_min).floor();
    // Mode indices past 2^53 are no longer exact in f64.
    if !(n_hi <= MAX_MODE) {
        return Err(RingError::InvalidParameter {
            name: "length / wavelength_min",
            value: length / wl_min,
            reason: "mode indices above 2^53 cannot be enumerated exactly",
        });
    }

    // L/λ may round across an integer; widen by one on each side and let the
    // exact window test decide.
    let first = (n_lo - 1.0).max(1.0) as u64;
    let last = (n_hi + 1.0).max(0.0) as u64;

    let modes = (first..=last)
        .map(|n| (n, length / n as f64))
        .filter(|&(_, wl)| wl >= wl_min && wl <= wl_max)
        .collect();

    Ok(ResonanceSet { modes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_edges_are_inclusive() {
        let set = resonances(1.0, 2.0, 10.0).unwrap();
        assert_eq!(set.modes(), vec![5, 6, 7, 8, 9, 10]);
        assert_eq!(set.get(5), Some(2.0));
        assert_eq!(set.get(10), Some(1.0));
    }

    #[test]
    fn test_ascending_mode_descending_wavelength() {
        let set = resonances(1.54, 1.56, 300.0).unwrap();
        assert!(!set.is_empty());
        let wls = set.wavelengths();
        for pair in wls.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        for (n, wl) in set.iter() {
            assert_relative_eq!(wl, 300.0 / n as f64, max_relative = 1e-15);
        }
    }

    #[test]
    fn test_rounding_does_not_drop_edge_mode() {
        // 0.3 / 3 lands just below 0.1, so mode 3 falls outside this window...
        let set = resonances(0.1, 0.15, 0.3).unwrap();
        assert_eq!(set.modes(), vec![2]);
        // ...and inside this one.
        let set = resonances(0.3 / 3.0, 0.3 / 2.0, 0.3).unwrap();
        assert_eq!(set.modes(), vec![2, 3]);
    }

    #[test]
    fn test_empty_window_is_not_an_error() {
        let set = resonances(1.3, 1.4, 10.0).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.nearest(1.35), None);

        // Window above the fundamental mode.
        assert!(resonances(20.0, 30.0, 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_window() {
        assert!(resonances(2.0, 1.0, 10.0).is_err());
        assert!(resonances(0.0, 1.0, 10.0).is_err());
        assert!(resonances(1.0, 2.0, -1.0).is_err());
        assert!(resonances(1.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_unbounded_mode_range_rejected() {
        // L/λ_min overflows to infinity.
        assert!(matches!(
            resonances(1e-300, 1.0, 1e300),
            Err(RingError::InvalidParameter { .. })
        ));
        // Finite, but past exact integer range.
        assert!(resonances(1e-10, 1.0, 1e10).is_err());
        // Large but exact mode indices still work.
        let set = resonances(1e-6, 1e-6, 1e6).unwrap();
        assert_eq!(set.modes(), vec![1_000_000_000_000]);
    }

    #[test]
    fn test_nearest() {
        let set = resonances(1.0, 2.0, 10.0).unwrap();
        assert_eq!(set.nearest(1.3), Some((8, 1.25)));
        assert_eq!(set.nearest(5.0), Some((5, 2.0)));
    }
}

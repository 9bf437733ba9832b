//! Errors raised by the ring resonator kernel.

use thiserror::Error;

/// Errors that can occur while evaluating the ring model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RingError {
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Division by zero: {quantity} is zero")]
    DivisionByZero { quantity: &'static str },

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Vec<usize>, found: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, RingError>;

/// Reject NaN/infinite values and anything outside `[0, 1]`.
pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(RingError::InvalidParameter { name, value, reason: "must be finite" });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(RingError::InvalidParameter {
            name,
            value,
            reason: "must lie in [0, 1]",
        });
    }
    Ok(value)
}

/// Reject NaN/infinite and non-positive values.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(RingError::InvalidParameter { name, value, reason: "must be finite" });
    }
    if value <= 0.0 {
        return Err(RingError::InvalidParameter {
            name,
            value,
            reason: "must be strictly positive",
        });
    }
    Ok(value)
}

/// Reject NaN/infinite values; any sign is allowed.
pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RingError::InvalidParameter { name, value, reason: "must be finite" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_bounds_are_inclusive() {
        assert_eq!(check_unit_interval("a", 0.0), Ok(0.0));
        assert_eq!(check_unit_interval("a", 1.0), Ok(1.0));
        assert!(check_unit_interval("a", 1.0 + 1e-12).is_err());
        assert!(check_unit_interval("a", -1e-12).is_err());
        assert!(check_unit_interval("a", f64::NAN).is_err());
    }

    #[test]
    fn test_error_message_names_the_parameter() {
        let err = check_positive("length", -2.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("length"), "message was: {}", msg);
        assert!(msg.contains("-2"), "message was: {}", msg);
    }
}

//! Shared argument checks.

use crate::error::ValidationError;

/// Returns `value` if it lies in `[low, high]`.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] naming the parameter and bounds
/// when the value is outside the range or NaN.
pub fn in_range(value: f64, low: f64, high: f64, name: &str) -> Result<f64, ValidationError> {
    if (low..=high).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            parameter: name.to_owned(),
            value,
            min: low,
            max: high,
        })
    }
}

/// Returns `value` if it is finite and not negative.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] with an infinite upper bound otherwise.
pub fn non_negative(value: f64, name: &str) -> Result<f64, ValidationError> {
    if value.is_finite() {
        in_range(value, 0.0, f64::INFINITY, name)
    } else {
        Err(ValidationError::OutOfRange {
            parameter: name.to_owned(),
            value,
            min: 0.0,
            max: f64::INFINITY,
        })
    }
}

/// Checks that two sequences have the same length.
///
/// # Errors
///
/// Returns [`ValidationError::LengthMismatch`] with both names and lengths.
pub fn length_match<A, B>(a: &[A], b: &[B], name_a: &str, name_b: &str) -> Result<(), ValidationError> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(ValidationError::LengthMismatch {
            name_a: name_a.to_owned(),
            len_a: a.len(),
            name_b: name_b.to_owned(),
            len_b: b.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn in_range_accepts_bounds() {
        assert!((in_range(0.0, 0.0, 1.0, "x").unwrap()).abs() < f64::EPSILON);
        assert!((in_range(1.0, 0.0, 1.0, "x").unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn in_range_names_parameter_and_bounds() {
        let err = in_range(1.5, 0.0, 1.0, "glz_ratio").unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                parameter: "glz_ratio".into(),
                value: 1.5,
                min: 0.0,
                max: 1.0,
            }
        );
        assert_eq!(
            err.to_string(),
            "glz_ratio must be between 0 and 1. Current value is 1.5"
        );
    }

    #[test]
    fn in_range_rejects_nan() {
        assert!(in_range(f64::NAN, 0.0, 1.0, "albedo").is_err());
    }

    #[test]
    fn non_negative_rejects_infinite_and_negative() {
        assert!(non_negative(3.0, "q").is_ok());
        assert!(non_negative(-0.1, "q").is_err());
        assert!(non_negative(f64::INFINITY, "q").is_err());
    }

    #[test]
    fn length_match_reports_both_lengths() {
        assert!(length_match(&[1, 2], &["a", "b"], "heights", "areas").is_ok());
        let err = length_match(&[1, 2, 3], &[1.0], "heights", "areas").unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                name_a: "heights".into(),
                len_a: 3,
                name_b: "areas".into(),
                len_b: 1,
            }
        );
    }
}

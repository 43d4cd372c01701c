use crate::{HvError, HvResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> HvResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HvError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> HvResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HvError::NonPositive { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: Real, what: &'static str) -> HvResult<Real> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(HvError::Negative { what, value: v })
    }
}

/// Maximum of a slice that propagates NaN instead of skipping it.
///
/// Returns `None` for an empty slice.
pub fn nan_max(values: &[Real]) -> Option<Real> {
    let (&first, rest) = values.split_first()?;
    Some(rest.iter().fold(first, |acc, &v| {
        if acc.is_nan() || v.is_nan() {
            Real::NAN
        } else {
            acc.max(v)
        }
    }))
}

/// Root mean square of a slice. Returns `None` for an empty slice.
pub fn rms(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        return None;
    }
    let sum_sq: Real = values.iter().map(|v| v * v).sum();
    Some((sum_sq / values.len() as Real).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1e-9, "x").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "x"),
            Err(HvError::NonPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(-1.0, "x"),
            Err(HvError::NonPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(Real::INFINITY, "x"),
            Err(HvError::NonFinite { .. })
        ));
    }

    #[test]
    fn ensure_non_negative_allows_zero() {
        assert_eq!(ensure_non_negative(0.0, "x"), Ok(0.0));
        assert!(matches!(
            ensure_non_negative(-0.1, "x"),
            Err(HvError::Negative { .. })
        ));
    }

    #[test]
    fn nan_max_propagates_nan() {
        assert_eq!(nan_max(&[]), None);
        assert_eq!(nan_max(&[-3.0, -1.0, -2.0]), Some(-1.0));
        assert!(nan_max(&[1.0, Real::NAN, 2.0]).unwrap().is_nan());
    }

    #[test]
    fn rms_of_constant_is_magnitude() {
        assert_eq!(rms(&[]), None);
        let r = rms(&[-2.0, 2.0, -2.0]).unwrap();
        assert!(nearly_equal(r, 2.0, Tolerances::default()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rms_is_bounded_by_max_abs(values in prop::collection::vec(-1e3_f64..1e3_f64, 1..64)) {
            let r = rms(&values).unwrap();
            let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            prop_assert!(r >= 0.0);
            prop_assert!(r <= max_abs * (1.0 + 1e-12));
        }
    }
}

//! Bracketed bisection root finder
//!
//! Used to invert the HS1101 capacitance fit, which is a cubic in RH with no
//! convenient closed-form inverse.
//!
//! The solver runs a fixed number of halvings instead of testing for
//! convergence, so every inversion costs the same and the result depends only
//! on the function and the bracket. After `n` iterations the returned midpoint
//! is within `(high - low) / 2^n` of a root.
//!
//! [`bisect`] holds no state between calls; independent inversions can run on
//! separate threads without coordination.

use crate::constants::tables::BISECTION_ITERATIONS;
use crate::errors::DomainError;

/// True when `a` and `b` are both positive or both negative.
///
/// Zero is never the same sign as anything, so an exact root at an endpoint or
/// midpoint counts as a sign change.
fn same_sign(a: f64, b: f64) -> bool {
    a * b > 0.0
}

fn evaluate<F: Fn(f64) -> f64>(f: &F, x: f64) -> Result<f64, DomainError> {
    let y = f(x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(DomainError::NonFiniteEvaluation { x })
    }
}

/// Find a root of `f` in `[low, high]` with the default iteration count
///
/// # Errors
///
/// [`DomainError::NoSignChange`] when `f(low)` and `f(high)` have the same
/// strict sign, carrying both endpoint values.
pub fn bisect<F: Fn(f64) -> f64>(f: F, low: f64, high: f64) -> Result<f64, DomainError> {
    bisect_with_iterations(f, low, high, BISECTION_ITERATIONS)
}

/// Find a root of `f` in `[low, high]` using exactly `iterations` halvings
///
/// Each iteration moves `low` to the midpoint when `f(low)` and `f(mid)` share
/// a sign and moves `high` otherwise, so the bracket always straddles a root.
/// The last midpoint is returned; with `iterations == 0` that is the bracket
/// centre.
pub fn bisect_with_iterations<F: Fn(f64) -> f64>(
    f: F,
    mut low: f64,
    mut high: f64,
    iterations: u32,
) -> Result<f64, DomainError> {
    let mut f_low = evaluate(&f, low)?;
    let f_high = evaluate(&f, high)?;

    if same_sign(f_low, f_high) {
        return Err(DomainError::NoSignChange { low, high, f_low, f_high });
    }

    let mut midpoint = (low + high) / 2.0;
    for _ in 0..iterations {
        midpoint = (low + high) / 2.0;
        let f_mid = evaluate(&f, midpoint)?;
        if same_sign(f_low, f_mid) {
            low = midpoint;
            f_low = f_mid;
        } else {
            high = midpoint;
        }
    }

    Ok(midpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn finds_square_root_of_two() {
        let x = bisect(|x| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((x - core::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn works_with_reversed_sign_orientation() {
        // Decreasing function: f(low) > 0, f(high) < 0
        let x = bisect(|x| 3.0 - x, 0.0, 10.0).unwrap();
        assert!((x - 3.0).abs() < 1e-14);
    }

    #[test]
    fn exact_root_at_endpoint_is_accepted() {
        let x = bisect(|x| x - 1.0, 1.0, 5.0).unwrap();
        assert!((x - 1.0).abs() < 1e-14);

        let x = bisect(|x| x - 5.0, 1.0, 5.0).unwrap();
        assert!((x - 5.0).abs() < 1e-14);
    }

    #[test]
    fn exact_root_at_midpoint() {
        let x = bisect(|x| x, -4.0, 4.0).unwrap();
        assert!(x.abs() < 1e-14);
    }

    #[test]
    fn missing_sign_change_is_reported_with_endpoints() {
        let err = bisect(|x| x * x + 1.0, -1.0, 2.0).unwrap_err();
        assert_eq!(
            err,
            DomainError::NoSignChange { low: -1.0, high: 2.0, f_low: 2.0, f_high: 5.0 }
        );
    }

    #[test]
    fn non_finite_function_is_reported() {
        let err = bisect(|x| 1.0 / x, 0.0, 1.0).unwrap_err();
        assert_eq!(err, DomainError::NonFiniteEvaluation { x: 0.0 });
    }

    #[test]
    fn zero_iterations_returns_centre() {
        let x = bisect_with_iterations(|x| x - 0.1, 0.0, 1.0, 0).unwrap();
        assert_eq!(x, 0.5);
    }

    proptest! {
        #[test]
        fn result_is_bracketed_and_near_root(
            root in -150.0f64..150.0,
            below in 0.5f64..100.0,
            above in 0.5f64..100.0,
            slope in prop_oneof![0.01f64..50.0, -50.0f64..-0.01],
        ) {
            let low = root - below;
            let high = root + above;
            let x = bisect(|x| slope * (x - root), low, high).unwrap();

            prop_assert!(x >= low && x <= high);
            let resolution = (high - low) * 2f64.powi(-(BISECTION_ITERATIONS as i32));
            let float_noise = 4.0 * f64::EPSILON * root.abs().max(1.0);
            prop_assert!((x - root).abs() <= resolution + float_noise);
        }
    }
}

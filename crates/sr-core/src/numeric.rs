/// Scalar type of every port value and partial.
pub type Real = f64;

/// Absolute and relative comparison bounds.
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

/// True when `a` and `b` agree within either bound.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Relative discrepancy `|a - b| / max(|a|, |b|)`, zero when both are zero.
pub fn relative_error(a: Real, b: Real) -> Real {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

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
    fn relative_error_handles_zero() {
        assert_eq!(relative_error(0.0, 0.0), 0.0);
        assert!((relative_error(1.0, 1.1) - 0.1 / 1.1).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn relative_error_symmetric_and_bounded(a in -1e6..1e6f64, b in -1e6..1e6f64) {
            let e = relative_error(a, b);
            prop_assert_eq!(e, relative_error(b, a));
            prop_assert!((0.0..=2.0).contains(&e));
        }
    }
}

// src/test_util.rs

use crate::{Precision, RsiConfig};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Full-precision config with the given window length.
pub fn full(length: usize) -> RsiConfig {
    RsiConfig::new(length).unwrap()
}

/// 2-decimal rounded config with the given window length.
pub fn rounded(length: usize) -> RsiConfig {
    full(length).with_precision(Precision::CENTS)
}

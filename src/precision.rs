use std::fmt::Display;

use crate::Price;

/// Rounding applied to every intermediate RSI value.
///
/// With [`Decimals`](Precision::Decimals), each difference, average,
/// relative strength and RSI is rounded right after it is computed, and
/// later values are computed from the rounded ones. Errors compound from
/// step to step; that is the published behaviour of the rounded
/// calculation, reproduced here exactly.
///
/// Rounding is decided on the exact binary value of the `f64`, ties to
/// even. `2.675` is stored as `2.67499999...` and rounds to `2.67`.
///
/// # Example
///
/// ```
/// use wilder_rsi::Precision;
///
/// assert_eq!(Precision::Full.apply(0.886_666), 0.886_666);
/// assert_eq!(Precision::CENTS.apply(0.886_666), 0.89);
/// assert_eq!(Precision::CENTS.apply(2.675), 2.67);
/// assert_eq!(Precision::CENTS.apply(0.125), 0.12);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum Precision {
    /// No rounding.
    #[default]
    Full,
    /// Round to this many decimal places.
    Decimals(u8),
}

impl Precision {
    /// Two decimal places.
    pub const CENTS: Self = Self::Decimals(2);

    /// Maps the on/off rounding switch to a precision.
    #[must_use]
    pub fn from_rounding(use_rounding: bool) -> Self {
        if use_rounding { Self::CENTS } else { Self::Full }
    }

    #[inline]
    #[must_use]
    pub fn is_rounding(self) -> bool {
        matches!(self, Self::Decimals(_))
    }

    #[inline]
    #[must_use]
    pub fn apply(self, value: Price) -> Price {
        match self {
            Self::Full => value,
            Self::Decimals(_) if !value.is_finite() => value,
            // Fixed-precision formatting is exact (ties to even), and parsing
            // the shortest decimal back gives the nearest f64.
            Self::Decimals(places) => format!("{value:.prec$}", prec = usize::from(places))
                .parse()
                .unwrap_or(value),
        }
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Decimals(places) => write!(f, "{places}dp"),
        }
    }
}

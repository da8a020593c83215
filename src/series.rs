use std::borrow::Cow;

use crate::RsiError;

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Ordered, non-empty sequence of finite prices.
///
/// Validation happens once, at construction, so both RSI formulations can
/// consume the series without re-checking. Borrows the caller's slice when
/// built with [`new`](PriceSeries::new); owns its values when collected
/// with [`from_values`](PriceSeries::from_values).
///
/// # Example
///
/// ```
/// use wilder_rsi::PriceSeries;
///
/// let closes = [44.0, 44.5, 43.5];
/// let series = PriceSeries::new(&closes).unwrap();
/// assert_eq!(series.len(), 3);
///
/// let integers = PriceSeries::from_values([10_i32, 11, 9]).unwrap();
/// assert_eq!(integers.as_slice(), &[10.0, 11.0, 9.0]);
///
/// assert!(PriceSeries::new(&[]).is_err());
/// assert!(PriceSeries::new(&[1.0, f64::NAN]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries<'a> {
    prices: Cow<'a, [Price]>,
}

impl<'a> PriceSeries<'a> {
    /// Validates and borrows `prices`.
    ///
    /// # Errors
    ///
    /// [`RsiError::InvalidInput`] if `prices` is empty or holds a NaN or
    /// infinite value; the error names the first offending position.
    pub fn new(prices: &'a [Price]) -> Result<Self, RsiError> {
        validate(prices)?;

        Ok(Self {
            prices: Cow::Borrowed(prices),
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always `false`: an empty series cannot be constructed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Price] {
        &self.prices
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Price> + '_ {
        self.prices.iter().copied()
    }

    #[must_use]
    pub fn into_owned(self) -> PriceSeries<'static> {
        PriceSeries {
            prices: Cow::Owned(self.prices.into_owned()),
        }
    }
}

impl PriceSeries<'static> {
    /// Collects any values losslessly convertible into [`Price`]
    /// (`i32`, `u32`, `f32`, ...) into an owned series.
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`].
    pub fn from_values<I, T>(values: I) -> Result<Self, RsiError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Price>,
    {
        let prices: Vec<Price> = values.into_iter().map(Into::into).collect();
        validate(&prices)?;

        Ok(Self {
            prices: Cow::Owned(prices),
        })
    }
}

impl<'a> TryFrom<&'a [Price]> for PriceSeries<'a> {
    type Error = RsiError;

    fn try_from(prices: &'a [Price]) -> Result<Self, Self::Error> {
        Self::new(prices)
    }
}

impl AsRef<[Price]> for PriceSeries<'_> {
    fn as_ref(&self) -> &[Price] {
        self.as_slice()
    }
}

fn validate(prices: &[Price]) -> Result<(), RsiError> {
    if prices.is_empty() {
        return Err(RsiError::empty_input());
    }

    match prices.iter().position(|price| !price.is_finite()) {
        Some(position) => Err(RsiError::non_finite(position, prices[position])),
        None => Ok(()),
    }
}

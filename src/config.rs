use std::{fmt::Display, num::NonZero};

use crate::{Precision, RsiError};

/// Window length used when none is given.
pub const DEFAULT_LENGTH: usize = 14;

/// Configuration for the Relative Strength Index ([`Rsi`](crate::Rsi)).
///
/// Wilder's smoothing has infinite memory: the SMA seed (first `length`
/// price changes) influences all subsequent values. Averages and RSI are
/// defined from the record at position `length + 1` onward.
///
/// The default is a 14-period window with 2-decimal rounding.
///
/// # Example
///
/// ```
/// use wilder_rsi::{Precision, RsiConfig};
///
/// let config = RsiConfig::new(14).unwrap();
/// assert_eq!(config.length(), 14);
/// assert_eq!(config.precision(), Precision::Full);
///
/// let rounded = RsiConfig::builder().length(3).rounding(true).build().unwrap();
/// assert_eq!(rounded.to_string(), "RsiConfig(3, 2dp)");
///
/// assert!(RsiConfig::new(0).is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    precision: Precision,
}

impl RsiConfig {
    /// Full-precision RSI over `length` periods.
    ///
    /// # Errors
    ///
    /// [`RsiError::InvalidConfiguration`] if `length` is zero.
    pub fn new(length: usize) -> Result<Self, RsiError> {
        Self::builder()
            .length(length)
            .precision(Precision::Full)
            .build()
    }

    /// Full-precision RSI over a length that cannot be zero.
    #[must_use]
    pub fn with_length(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            precision: Precision::Full,
        }
    }

    /// Returns a new builder with default values.
    #[must_use]
    pub fn builder() -> RsiConfigBuilder {
        RsiConfigBuilder::new()
    }

    /// Window length (number of price changes in the seed).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns a copy with `precision` applied.
    #[must_use]
    pub fn with_precision(self, precision: Precision) -> Self {
        Self { precision, ..self }
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            precision: Precision::CENTS,
        }
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.precision)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: length = [`DEFAULT_LENGTH`], precision = [`Precision::CENTS`].
#[derive(Clone, Debug)]
pub struct RsiConfigBuilder {
    length: usize,
    precision: Precision,
}

impl RsiConfigBuilder {
    fn new() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            precision: Precision::CENTS,
        }
    }

    /// Sets the window length. Zero is rejected by [`build`](Self::build).
    #[must_use]
    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Sets the precision.
    #[must_use]
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Switches 2-decimal rounding on or off.
    #[must_use]
    pub fn rounding(self, use_rounding: bool) -> Self {
        self.precision(Precision::from_rounding(use_rounding))
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// [`RsiError::InvalidConfiguration`] if the length is zero.
    pub fn build(self) -> Result<RsiConfig, RsiError> {
        if self.length == 0 {
            return Err(RsiError::zero_length());
        }

        Ok(RsiConfig {
            length: self.length,
            precision: self.precision,
        })
    }
}

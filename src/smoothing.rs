//! Wilder smoothing arithmetic shared by the streaming and batch
//! formulations.
//!
//! Every operation applies the configured [`Precision`] to its result, so a
//! rounded run compounds exactly like the reference calculation. Averages
//! use `(prev * (length - 1) + value) / length` without fused multiply-add
//! to stay bit-identical with it.

use crate::{Precision, Price, RsiConfig};

/// One period-over-period price move, split into its up and down parts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Change {
    pub(crate) difference: Price,
    pub(crate) gain: Price,
    pub(crate) loss: Price,
}

impl Change {
    #[inline]
    fn from_difference(difference: Price) -> Self {
        let (gain, loss) = if difference > 0.0 {
            (difference, 0.0)
        } else if difference < 0.0 {
            (0.0, difference.abs())
        } else {
            (0.0, 0.0)
        };

        Self {
            difference,
            gain,
            loss,
        }
    }
}

/// Relative strength and RSI derived from a pair of averages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Strength {
    /// `None` when the average loss is zero.
    pub(crate) rs: Option<Price>,
    pub(crate) rsi: Price,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Smoothing {
    length: f64,
    length_minus_one: f64,
    precision: Precision,
}

impl Smoothing {
    pub(crate) fn new(config: RsiConfig) -> Self {
        Self {
            #[allow(clippy::cast_precision_loss)]
            length: config.length() as f64,
            #[allow(clippy::cast_precision_loss)]
            length_minus_one: (config.length() - 1) as f64,
            precision: config.precision(),
        }
    }

    #[inline]
    pub(crate) fn round(self, value: Price) -> Price {
        self.precision.apply(value)
    }

    #[inline]
    pub(crate) fn difference(self, prev_price: Price, price: Price) -> Price {
        self.round(price - prev_price)
    }

    #[inline]
    pub(crate) fn change(self, prev_price: Price, price: Price) -> Change {
        Change::from_difference(self.difference(prev_price, price))
    }

    /// Simple mean of the first `length` gains (or losses), given their sum.
    #[inline]
    pub(crate) fn seed(self, sum: Price) -> Price {
        self.round(sum / self.length)
    }

    /// Wilder's recurrence: `(prev_avg × (length − 1) + value) / length`.
    #[inline]
    pub(crate) fn step(self, prev_avg: Price, value: Price) -> Price {
        self.round((prev_avg * self.length_minus_one + value) / self.length)
    }

    /// RS and RSI for a pair of averages.
    ///
    /// A zero average loss leaves RS undefined. RSI is then 100 when there
    /// were gains (its limit as losses vanish) and 0 for a flat market.
    #[inline]
    pub(crate) fn strength(self, avg_gain: Price, avg_loss: Price) -> Strength {
        if avg_loss == 0.0 {
            let rsi = if avg_gain > 0.0 { 100.0 } else { 0.0 };
            return Strength { rs: None, rsi };
        }

        let rs = self.round(avg_gain / avg_loss);
        let rsi = self.round(100.0 - (100.0 / (1.0 + rs)));

        Strength { rs: Some(rs), rsi }
    }
}

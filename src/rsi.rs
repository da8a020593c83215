use std::fmt::Display;

use tracing::{debug, trace};

use crate::{
    Price, PriceSeries, RsiConfig, RsiError,
    smoothing::{Change, Smoothing},
};

/// One output row of the streaming RSI, emitted for every input price.
///
/// `avg_gain`, `avg_loss` and `rsi` are `0.0` until the seed window is
/// complete (positions `1..=length`). `gain` and `loss` are never both
/// nonzero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "csv", derive(serde::Serialize))]
pub struct PeriodRecord {
    /// 1-based position in the input.
    pub index: usize,
    pub price: Price,
    pub gain: Price,
    pub loss: Price,
    pub avg_gain: Price,
    pub avg_loss: Price,
    /// 0–100 once defined.
    pub rsi: Price,
}

impl PeriodRecord {
    fn first(index: usize, price: Price) -> Self {
        Self {
            index,
            price,
            ..Self::default()
        }
    }

    fn warmup(index: usize, price: Price, change: Change) -> Self {
        Self {
            index,
            price,
            gain: change.gain,
            loss: change.loss,
            ..Self::default()
        }
    }

    fn smoothed(
        smoothing: Smoothing,
        index: usize,
        price: Price,
        change: Change,
        avg_gain: Price,
        avg_loss: Price,
    ) -> Self {
        Self {
            index,
            price,
            gain: change.gain,
            loss: change.loss,
            avg_gain,
            avg_loss,
            rsi: smoothing.strength(avg_gain, avg_loss).rsi,
        }
    }
}

#[derive(Clone, Debug)]
enum RsiPhase {
    /// No price seen yet.
    Cold,
    /// Collecting the first `length` changes for the SMA seed.
    Seeding {
        sum_gain: f64,
        sum_loss: f64,
        changes: usize,
    },
    /// Wilder-smoothed averages of the latest record.
    Active { avg_gain: f64, avg_loss: f64 },
}

/// Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// The first `length` price changes are averaged with a simple
/// mean (SMA seed). After seeding, gains and losses are smoothed
/// with Wilder's method (`α = 1 / length`):
///
/// ```text
/// avg_gain = (prev_avg_gain × (length − 1) + gain) / length
/// avg_loss = (prev_avg_loss × (length − 1) + loss) / length
/// RS       = avg_gain / avg_loss
/// RSI      = 100 − 100 / (1 + RS)
/// ```
///
/// When the average loss is zero, RSI is 100 if there were gains and 0
/// for a flat market.
///
/// # Example
///
/// ```
/// use wilder_rsi::{Rsi, RsiConfig};
///
/// let mut rsi = Rsi::new(RsiConfig::builder().length(3).build().unwrap());
///
/// // Warmup: averages are not defined before 3 price changes (4 prices)
/// assert_eq!(rsi.compute(10.0).rsi, 0.0);
/// assert_eq!(rsi.compute(10.0).rsi, 0.0);
/// assert_eq!(rsi.compute(11.0).rsi, 0.0);
///
/// // Changes 0, +1, −1 → avg_gain = avg_loss = 0.33 → RSI = 50
/// let seed = rsi.compute(10.0);
/// assert_eq!((seed.avg_gain, seed.avg_loss, seed.rsi), (0.33, 0.33, 50.0));
///
/// // (0.33 × 2 + 2) / 3 → 0.89, (0.33 × 2 + 0) / 3 → 0.22
/// assert_eq!(rsi.compute(12.0).rsi, 80.2);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    smoothing: Smoothing,
    phase: RsiPhase,
    prev_price: Price,
    count: usize,
    current: Option<PeriodRecord>,
}

impl Rsi {
    #[must_use]
    pub fn new(config: RsiConfig) -> Self {
        Self {
            config,
            smoothing: Smoothing::new(config),
            phase: RsiPhase::Cold,
            prev_price: 0.0,
            count: 0,
            current: None,
        }
    }

    /// Feeds the next price and returns its record.
    ///
    /// Prices must be finite; use [`PriceSeries`] to validate untrusted
    /// input first.
    pub fn compute(&mut self, price: Price) -> PeriodRecord {
        debug_assert!(price.is_finite(), "price must be finite, got {price}");

        let index = self.count + 1;
        let smoothing = self.smoothing;

        let record = match &mut self.phase {
            RsiPhase::Cold => {
                self.phase = RsiPhase::Seeding {
                    sum_gain: 0.0,
                    sum_loss: 0.0,
                    changes: 0,
                };

                PeriodRecord::first(index, price)
            }

            RsiPhase::Seeding {
                sum_gain,
                sum_loss,
                changes,
            } => {
                let change = smoothing.change(self.prev_price, price);

                *sum_gain += change.gain;
                *sum_loss += change.loss;
                *changes += 1;

                if *changes < self.config.length() {
                    PeriodRecord::warmup(index, price, change)
                } else {
                    // Seed window complete: SMA of the first `length` changes
                    let avg_gain = smoothing.seed(*sum_gain);
                    let avg_loss = smoothing.seed(*sum_loss);

                    trace!(index, avg_gain, avg_loss, "seeded Wilder averages");

                    self.phase = RsiPhase::Active { avg_gain, avg_loss };

                    PeriodRecord::smoothed(smoothing, index, price, change, avg_gain, avg_loss)
                }
            }

            RsiPhase::Active { avg_gain, avg_loss } => {
                let change = smoothing.change(self.prev_price, price);

                *avg_gain = smoothing.step(*avg_gain, change.gain);
                *avg_loss = smoothing.step(*avg_loss, change.loss);

                PeriodRecord::smoothed(smoothing, index, price, change, *avg_gain, *avg_loss)
            }
        };

        self.prev_price = price;
        self.count = index;
        self.current = Some(record);

        record
    }

    /// Returns the last computed record without advancing state,
    /// or `None` before the first price.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<PeriodRecord> {
        self.current
    }

    /// True once the seed window is complete and averages are defined.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, RsiPhase::Active { .. })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> RsiConfig {
        self.config
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RSI({}, {})",
            self.config.length(),
            self.config.precision()
        )
    }
}

/// Computes one [`PeriodRecord`] per price.
///
/// # Errors
///
/// [`RsiError::InvalidInput`] if `prices` is empty or holds a non-finite
/// value. A window at least as long as the series is not an error: every
/// record then stays in warmup.
///
/// # Example
///
/// ```
/// use wilder_rsi::{RsiConfig, compute};
///
/// let config = RsiConfig::builder().length(1).build().unwrap();
/// let records = compute(&[44.0, 44.5, 43.5], config).unwrap();
///
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[1].rsi, 100.0); // gains only
/// assert_eq!(records[2].rsi, 0.0); // losses only
/// ```
pub fn compute(prices: &[Price], config: RsiConfig) -> Result<Vec<PeriodRecord>, RsiError> {
    let series = PriceSeries::new(prices)?;

    Ok(compute_series(&series, config))
}

/// Computes one [`PeriodRecord`] per price of an already validated series.
#[must_use]
pub fn compute_series(series: &PriceSeries<'_>, config: RsiConfig) -> Vec<PeriodRecord> {
    if config.length() >= series.len() {
        debug!(
            length = config.length(),
            prices = series.len(),
            "window not shorter than series, RSI stays undefined"
        );
    }

    let mut rsi = Rsi::new(config);

    series.iter().map(|price| rsi.compute(price)).collect()
}

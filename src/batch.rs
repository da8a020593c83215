use std::iter;

use tracing::debug;

use crate::{Price, PriceSeries, RsiConfig, RsiError, smoothing::Smoothing};

/// Column-oriented RSI result.
///
/// Each column has one entry per input price. `None` marks a row where the
/// value is not defined: the first row has no difference, averages start at
/// row `length`, and `rs` is undefined wherever the average loss is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct RsiColumns {
    diff: Vec<Option<Price>>,
    gain: Vec<Option<Price>>,
    loss: Vec<Option<Price>>,
    avg_gain: Vec<Option<Price>>,
    avg_loss: Vec<Option<Price>>,
    rs: Vec<Option<Price>>,
    rsi: Vec<Option<Price>>,
}

impl RsiColumns {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.diff.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }

    /// Price minus previous price.
    #[must_use]
    pub fn diff(&self) -> &[Option<Price>] {
        &self.diff
    }

    #[must_use]
    pub fn gain(&self) -> &[Option<Price>] {
        &self.gain
    }

    #[must_use]
    pub fn loss(&self) -> &[Option<Price>] {
        &self.loss
    }

    #[must_use]
    pub fn avg_gain(&self) -> &[Option<Price>] {
        &self.avg_gain
    }

    #[must_use]
    pub fn avg_loss(&self) -> &[Option<Price>] {
        &self.avg_loss
    }

    /// Relative strength, `avg_gain / avg_loss`.
    #[must_use]
    pub fn rs(&self) -> &[Option<Price>] {
        &self.rs
    }

    #[must_use]
    pub fn rsi(&self) -> &[Option<Price>] {
        &self.rsi
    }
}

/// Computes RSI a whole column at a time.
///
/// Differences are taken over adjacent pairs and clipped into gain and loss
/// columns. The averages are seeded at row `length` with the mean of the
/// first `length` gains and losses, then every later row applies Wilder's
/// recurrence to the row above it. Produces the same gain, loss, average and
/// RSI values as [`compute`](crate::compute) for the same input and config.
///
/// # Errors
///
/// [`RsiError::InvalidInput`] if `prices` is empty or holds a non-finite
/// value.
///
/// # Example
///
/// ```
/// use wilder_rsi::{RsiConfig, compute_columns};
///
/// let config = RsiConfig::builder().length(3).build().unwrap();
/// let columns = compute_columns(&[10.0, 10.0, 11.0, 10.0, 12.0], config).unwrap();
///
/// assert_eq!(columns.diff()[0], None);
/// assert_eq!(columns.avg_gain()[2], None);
/// assert_eq!(columns.avg_gain()[3], Some(0.33));
/// assert_eq!(columns.rs()[4], Some(4.05));
/// assert_eq!(columns.rsi()[4], Some(80.2));
/// ```
pub fn compute_columns(prices: &[Price], config: RsiConfig) -> Result<RsiColumns, RsiError> {
    let series = PriceSeries::new(prices)?;

    Ok(compute_series_columns(&series, config))
}

/// Column-oriented RSI of an already validated series.
#[must_use]
pub fn compute_series_columns(series: &PriceSeries<'_>, config: RsiConfig) -> RsiColumns {
    let smoothing = Smoothing::new(config);
    let prices = series.as_slice();

    let diff: Vec<Option<Price>> = iter::once(None)
        .chain(
            prices
                .windows(2)
                .map(|pair| Some(smoothing.difference(pair[0], pair[1]))),
        )
        .collect();

    let gain: Vec<Option<Price>> = diff.iter().map(|d| d.map(|d| d.max(0.0))).collect();
    let loss: Vec<Option<Price>> = diff.iter().map(|d| d.map(|d| d.min(0.0).abs())).collect();

    let avg_gain = smoothed_column(smoothing, &gain, config.length());
    let avg_loss = smoothed_column(smoothing, &loss, config.length());

    let (rs, rsi) = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(avg_gain, avg_loss)| match (avg_gain, avg_loss) {
            (Some(avg_gain), Some(avg_loss)) => {
                let strength = smoothing.strength(*avg_gain, *avg_loss);
                (strength.rs, Some(strength.rsi))
            }
            _ => (None, None),
        })
        .unzip();

    debug!(rows = prices.len(), %config, "computed RSI columns");

    RsiColumns {
        diff,
        gain,
        loss,
        avg_gain,
        avg_loss,
        rs,
        rsi,
    }
}

/// Seeds at row `length` with the window mean of rows `1..=length`, then
/// fills each later row from the one above.
fn smoothed_column(
    smoothing: Smoothing,
    values: &[Option<Price>],
    length: usize,
) -> Vec<Option<Price>> {
    let mut column = vec![None; values.len()];

    if length >= values.len() {
        return column;
    }

    let window_sum: Price = values[1..=length].iter().flatten().sum();
    column[length] = Some(smoothing.seed(window_sum));

    for row in length + 1..values.len() {
        column[row] = column[row - 1]
            .zip(values[row])
            .map(|(prev_avg, value)| smoothing.step(prev_avg, value));
    }

    column
}

//! Relative Strength Index with Wilder's original smoothing.
//!
//! The first `length` price changes seed the average gain and loss with a
//! simple mean; every later period applies Wilder's `α = 1 / length`
//! recurrence to the previous averages. Values can be rounded at every step
//! (see [`Precision`]) to reproduce the published, rounded calculation
//! exactly.
//!
//! Two formulations produce the same numbers:
//!
//! - [`Rsi`] / [`compute`]: streaming, one [`PeriodRecord`] per price.
//! - [`compute_columns`]: whole columns at a time, as [`RsiColumns`].
//!
//! With the `csv` feature (on by default), [`PriceTable`] and [`BatchRsi`]
//! read a price column from CSV and write the result back.
//!
//! ```
//! use wilder_rsi::{RsiConfig, compute, compute_columns};
//!
//! let prices = [10.0, 10.0, 11.0, 10.0, 12.0, 13.0];
//! let config = RsiConfig::builder().length(3).rounding(true).build().unwrap();
//!
//! let records = compute(&prices, config).unwrap();
//! assert_eq!(records[5].rsi, 86.11);
//!
//! let columns = compute_columns(&prices, config).unwrap();
//! assert_eq!(columns.rsi()[5], Some(86.11));
//! ```

mod batch;
mod config;
mod error;
mod precision;
mod rsi;
mod series;
mod smoothing;
#[cfg(feature = "csv")]
mod table;

pub use crate::batch::{RsiColumns, compute_columns, compute_series_columns};
pub use crate::config::{DEFAULT_LENGTH, RsiConfig, RsiConfigBuilder};
pub use crate::error::RsiError;
pub use crate::precision::Precision;
pub use crate::rsi::{PeriodRecord, Rsi, compute, compute_series};
pub use crate::series::{Price, PriceSeries};
#[cfg(feature = "csv")]
pub use crate::table::{BatchRsi, DEFAULT_PRICE_COLUMN, PriceTable, RsiTable, write_records};

#[cfg(test)]
mod test_util;

#[cfg(test)]
mod thread_safety {
    use super::{PeriodRecord, Rsi, RsiColumns, RsiConfig};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_and_results_are_send_sync() {
        assert_send_sync::<Rsi>();
        assert_send_sync::<RsiConfig>();
        assert_send_sync::<PeriodRecord>();
        assert_send_sync::<RsiColumns>();
    }

    #[test]
    fn independent_runs_on_threads() {
        let prices: Vec<f64> = (0..64).map(|i| f64::from(i % 7) + 10.0).collect();
        let config = RsiConfig::default();
        let expected = crate::compute(&prices, config).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| crate::compute(&prices, config).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}

use std::fmt::Display;

use thiserror::Error;

/// Errors reported by RSI computation and table I/O.
///
/// The computation is deterministic: every error is terminal for the call
/// that produced it and no partial output is returned.
#[derive(Debug, Error)]
pub enum RsiError {
    /// A configuration value is out of range or refers to something that
    /// does not exist (window length of zero, unknown price column).
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The price data cannot be used: empty, non-finite or non-numeric.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[cfg(feature = "csv")]
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "csv")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl RsiError {
    pub(crate) fn zero_length() -> Self {
        Self::InvalidConfiguration {
            reason: "window length must be at least 1".to_owned(),
        }
    }

    pub(crate) fn empty_input() -> Self {
        Self::InvalidInput {
            reason: "price series is empty".to_owned(),
        }
    }

    pub(crate) fn non_finite(position: usize, value: impl Display) -> Self {
        Self::InvalidInput {
            reason: format!("price at position {position} is not a finite number: {value}"),
        }
    }

    #[cfg(feature = "csv")]
    pub(crate) fn non_numeric(row: usize, column: &str, text: &str) -> Self {
        Self::InvalidInput {
            reason: format!("row {row}, column {column:?}: {text:?} is not a number"),
        }
    }

    #[cfg(feature = "csv")]
    pub(crate) fn unknown_column(column: &str) -> Self {
        Self::InvalidConfiguration {
            reason: format!("no column named {column:?}"),
        }
    }

    /// True for [`RsiError::InvalidConfiguration`].
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    /// True for [`RsiError::InvalidInput`].
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

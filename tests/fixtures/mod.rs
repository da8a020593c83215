#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use wilder_rsi::{PeriodRecord, RsiColumns};

/// Daily bar parsed from the price fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
}

/// Expected output row of the reference calculation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RefRecord {
    pub index: usize,
    pub price: f64,
    pub gain: f64,
    pub loss: f64,
    pub avg_gain: f64,
    pub avg_loss: f64,
    pub rsi: f64,
}

pub const PRICES_PATH: &str = "tests/fixtures/data/prices.csv";

/// RSI(14) with 2-decimal rounding at every step.
pub const RSI_14_ROUNDED_PATH: &str = "tests/fixtures/data/rsi-14-rounded.csv";

/// RSI(14) without rounding.
pub const RSI_14_RAW_PATH: &str = "tests/fixtures/data/rsi-14-raw.csv";

pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(PRICES_PATH, "invalid price record")
}

pub fn load_reference_closes() -> Vec<f64> {
    load_reference_bars().iter().map(|bar| bar.close).collect()
}

pub fn load_ref_records(path: &str) -> Vec<RefRecord> {
    load_records(path, "invalid reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Assert a streaming record against the reference row, field by field.
pub fn assert_record_matches(actual: &PeriodRecord, expected: &RefRecord, tolerance: f64) {
    assert_eq!(actual.index, expected.index, "index");

    for (field, a, e) in [
        ("price", actual.price, expected.price),
        ("gain", actual.gain, expected.gain),
        ("loss", actual.loss, expected.loss),
        ("avg_gain", actual.avg_gain, expected.avg_gain),
        ("avg_loss", actual.avg_loss, expected.avg_loss),
        ("rsi", actual.rsi, expected.rsi),
    ] {
        assert_near(a, e, tolerance, &format!("{field} at index {}", expected.index));
    }
}

/// Assert one row of batch columns against the reference row. Undefined
/// cells compare as zero, the way the streaming records report them.
pub fn assert_columns_match(columns: &RsiColumns, row: usize, expected: &RefRecord, tolerance: f64) {
    let at = |column: &[Option<f64>]| column[row].unwrap_or(0.0);

    for (field, a, e) in [
        ("gain", at(columns.gain()), expected.gain),
        ("loss", at(columns.loss()), expected.loss),
        ("avg_gain", at(columns.avg_gain()), expected.avg_gain),
        ("avg_loss", at(columns.avg_loss()), expected.avg_loss),
        ("rsi", at(columns.rsi()), expected.rsi),
    ] {
        assert_near(a, e, tolerance, &format!("batch {field} at row {row}"));
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}

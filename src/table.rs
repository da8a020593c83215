//! CSV-backed tables for the batch runner.
//!
//! [`PriceTable`] loads a headered CSV whose first column is an index or
//! date label, [`BatchRsi`] computes RSI columns over one named price
//! column, and [`RsiTable`] writes the result back out. The index column is
//! carried through verbatim.

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{PeriodRecord, Price, PriceSeries, RsiColumns, RsiConfig, RsiError};

/// Price column read when none is configured.
pub const DEFAULT_PRICE_COLUMN: &str = "Close";

/// Headered table of price data.
///
/// # Example
///
/// ```
/// use wilder_rsi::PriceTable;
///
/// let csv = "Date,Close\n2024-01-02,44.0\n2024-01-03,44.5\n";
/// let table = PriceTable::from_reader(csv.as_bytes()).unwrap();
///
/// assert_eq!(table.index_name(), "Date");
/// assert_eq!(table.index(), &["2024-01-02", "2024-01-03"]);
/// assert_eq!(table.prices("Close").unwrap().as_slice(), &[44.0, 44.5]);
/// assert!(table.prices("Open").is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PriceTable {
    headers: Vec<String>,
    index: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl PriceTable {
    /// Reads a table from CSV text. Cells are trimmed; rows must all have
    /// the header's width.
    ///
    /// # Errors
    ///
    /// [`RsiError::Csv`] on malformed CSV or ragged rows.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RsiError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(str::to_owned).collect();
        let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;
        let index = rows
            .iter()
            .map(|row| row.get(0).unwrap_or_default().to_owned())
            .collect();

        Ok(Self {
            headers,
            index,
            rows,
        })
    }

    /// Reads a table from a CSV file.
    ///
    /// # Errors
    ///
    /// [`RsiError::Io`] if the file cannot be opened, otherwise as
    /// [`from_reader`](Self::from_reader).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RsiError> {
        let path = path.as_ref();
        let table = Self::from_reader(File::open(path)?)?;

        debug!(path = %path.display(), rows = table.len(), "loaded price table");

        Ok(table)
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header of the first column.
    #[must_use]
    pub fn index_name(&self) -> &str {
        self.headers.first().map_or("", String::as_str)
    }

    /// First-column labels, one per row.
    #[must_use]
    pub fn index(&self) -> &[String] {
        &self.index
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Parses the named column into a validated series.
    ///
    /// # Errors
    ///
    /// [`RsiError::InvalidConfiguration`] if no column has that name.
    /// [`RsiError::InvalidInput`] if the table has no rows or at the first
    /// cell that is not a finite number.
    pub fn prices(&self, column: &str) -> Result<PriceSeries<'static>, RsiError> {
        let position = self
            .headers
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| RsiError::unknown_column(column))?;

        let prices = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let text = record.get(position).unwrap_or_default();
                text.parse::<Price>()
                    .map_err(|_| RsiError::non_numeric(row + 1, column, text))
            })
            .collect::<Result<Vec<_>, _>>()?;

        PriceSeries::from_values(prices)
    }
}

/// Batch RSI over one column of a [`PriceTable`].
///
/// The price column defaults to [`DEFAULT_PRICE_COLUMN`]. When an output
/// path is set, [`run`](BatchRsi::run) also writes the result there.
///
/// # Example
///
/// ```
/// use wilder_rsi::{BatchRsi, PriceTable, RsiConfig};
///
/// let csv = "Date,Last\n1,10\n2,10\n3,11\n4,10\n5,12\n";
/// let table = PriceTable::from_reader(csv.as_bytes()).unwrap();
///
/// let config = RsiConfig::builder().length(3).build().unwrap();
/// let result = BatchRsi::new(config).price_column("Last").run(&table).unwrap();
///
/// assert_eq!(result.columns().rsi()[3], Some(50.0));
/// assert_eq!(result.columns().rsi()[4], Some(80.2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRsi {
    config: RsiConfig,
    price_column: String,
    output: Option<PathBuf>,
}

impl BatchRsi {
    #[must_use]
    pub fn new(config: RsiConfig) -> Self {
        Self {
            config,
            price_column: DEFAULT_PRICE_COLUMN.to_owned(),
            output: None,
        }
    }

    /// Sets the column the prices are read from.
    #[must_use]
    pub fn price_column(mut self, column: impl Into<String>) -> Self {
        self.price_column = column.into();
        self
    }

    /// Writes the result as CSV to `path` on every run.
    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    #[must_use]
    pub fn config(&self) -> RsiConfig {
        self.config
    }

    /// Computes RSI columns over the configured price column.
    ///
    /// # Errors
    ///
    /// Errors from [`PriceTable::prices`], and [`RsiError::Io`] or
    /// [`RsiError::Csv`] if the output cannot be written.
    pub fn run(&self, table: &PriceTable) -> Result<RsiTable, RsiError> {
        let series = table.prices(&self.price_column)?;
        let columns = crate::compute_series_columns(&series, self.config);

        let result = RsiTable {
            index_name: table.index_name().to_owned(),
            index: table.index().to_vec(),
            prices: series.as_slice().to_vec(),
            columns,
        };

        if let Some(path) = &self.output {
            result.write_path(path)?;
            debug!(path = %path.display(), rows = result.len(), "wrote RSI table");
        }

        Ok(result)
    }
}

impl Default for BatchRsi {
    fn default() -> Self {
        Self::new(RsiConfig::default())
    }
}

/// Result of a [`BatchRsi`] run: the index column, the prices and the
/// computed [`RsiColumns`].
#[derive(Clone, Debug, PartialEq)]
pub struct RsiTable {
    index_name: String,
    index: Vec<String>,
    prices: Vec<Price>,
    columns: RsiColumns,
}

impl RsiTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    #[must_use]
    pub fn index(&self) -> &[String] {
        &self.index
    }

    #[must_use]
    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    #[must_use]
    pub fn columns(&self) -> &RsiColumns {
        &self.columns
    }

    /// Writes the table as CSV: the index column, then `price`, `gain`,
    /// `loss`, `avg_gain`, `avg_loss`, `rs` and `rsi`. Undefined values are
    /// empty cells.
    ///
    /// # Errors
    ///
    /// [`RsiError::Csv`] or [`RsiError::Io`] if writing fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), RsiError> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record([
            self.index_name.as_str(),
            "price",
            "gain",
            "loss",
            "avg_gain",
            "avg_loss",
            "rs",
            "rsi",
        ])?;

        let c = &self.columns;
        for row in 0..self.len() {
            wtr.write_record([
                self.index[row].clone(),
                self.prices[row].to_string(),
                cell(c.gain()[row]),
                cell(c.loss()[row]),
                cell(c.avg_gain()[row]),
                cell(c.avg_loss()[row]),
                cell(c.rs()[row]),
                cell(c.rsi()[row]),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to a file, replacing it if present.
    ///
    /// # Errors
    ///
    /// As [`write_csv`](Self::write_csv), plus failure to create the file.
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<(), RsiError> {
        self.write_csv(BufWriter::new(File::create(path)?))
    }
}

/// Writes streaming records as CSV with the header
/// `index,price,gain,loss,avg_gain,avg_loss,rsi`.
///
/// # Errors
///
/// [`RsiError::Csv`] or [`RsiError::Io`] if writing fails.
pub fn write_records<W: io::Write>(writer: W, records: &[PeriodRecord]) -> Result<(), RsiError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}

fn cell(value: Option<Price>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

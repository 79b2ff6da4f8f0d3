//! I/O error types for warpskill-io.

use std::path::PathBuf;

/// Errors from file I/O, CSV parsing, and series lookup.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has more columns than the header.
    #[error("row {row_index} (series {series_id}) in {path} has {got} columns, header has {expected}")]
    RowTooLong {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Series ID of the offending row.
        series_id: String,
        /// Number of columns in the header.
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a cell value is NaN, Inf, or otherwise not a finite float.
    #[error("non-finite value in {path}: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based time-step index (excluding the series_id column).
        col_index: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when an empty cell is followed by a value in the same row.
    #[error("series {series_id} in {path} has a gap at time step {col_index}")]
    GapInSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Series ID of the offending row.
        series_id: String,
        /// Zero-based time-step index of the first empty cell.
        col_index: usize,
    },

    /// Returned when a row carries an ID but no values.
    #[error("series {series_id} in {path} has no values")]
    EmptySeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Series ID of the offending row.
        series_id: String,
    },

    /// Returned when a row's values are rejected by the series constructor.
    #[error("series {series_id} in {path} is invalid")]
    InvalidSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Series ID of the offending row.
        series_id: String,
        /// Underlying validation error.
        source: warpskill_dtw::DtwError,
    },

    /// Returned when a row has an empty series ID.
    #[error("row {row_index} in {path} has an empty series ID")]
    MissingSeriesId {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
    },

    /// Returned when the same series ID appears more than once.
    #[error("duplicate series ID \"{series_id}\" in {path}: first at row {first_row}, again at row {second_row}")]
    DuplicateSeriesId {
        /// Path to the CSV file.
        path: PathBuf,
        /// The duplicated series ID.
        series_id: String,
        /// Zero-based row index of the first occurrence.
        first_row: usize,
        /// Zero-based row index of the second occurrence.
        second_row: usize,
    },

    /// Returned when a requested series ID is not present in the table.
    #[error("unknown series \"{series_id}\" (available: {available})")]
    UnknownSeries {
        /// The requested ID.
        series_id: String,
        /// Comma-separated list of IDs present in the table.
        available: String,
    },
}

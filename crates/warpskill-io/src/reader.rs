//! CSV reader for named time series.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use warpskill_dtw::{DtwError, TimeSeries};

use crate::IoError;
use crate::domain::{SeriesId, SeriesTable};

/// Reads named time series from a CSV file.
///
/// Expected CSV format:
/// - Header row required (first column is the series ID, remaining are positional time steps)
/// - `series_id,t0,t1,...,tn`
/// - One row per series. Series may be shorter than the header: trailing
///   cells can be left empty or omitted.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::RowTooLong`] | Row has more columns than the header |
/// | [`IoError::MissingSeriesId`] | First cell of a row is empty |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::GapInSeries`] | An empty cell is followed by a value |
/// | [`IoError::EmptySeries`] | Row has an ID but no values |
/// | [`IoError::InvalidSeries`] | Values rejected by [`TimeSeries::new`] |
/// | [`IoError::DuplicateSeriesId`] | Same series ID appears twice |
pub struct SeriesReader {
    path: PathBuf,
}

impl SeriesReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`SeriesTable`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<SeriesTable, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) lets short rows through; long rows are caught below.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        let expected_cols = header.len();
        debug!(expected_cols, "read CSV header");

        let mut ids = Vec::new();
        let mut series = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;

            let id = record.get(0).unwrap_or("").to_string();
            if id.is_empty() {
                return Err(IoError::MissingSeriesId {
                    path: self.path.clone(),
                    row_index,
                });
            }

            if record.len() > expected_cols {
                return Err(IoError::RowTooLong {
                    path: self.path.clone(),
                    row_index,
                    series_id: id,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            if let Some(&first_row) = seen.get(&id) {
                return Err(IoError::DuplicateSeriesId {
                    path: self.path.clone(),
                    series_id: id,
                    first_row,
                    second_row: row_index,
                });
            }
            seen.insert(id.clone(), row_index);

            let values = self.parse_values(&record, row_index, &id)?;
            debug!(series = %id, len = values.len(), "parsed series");
            // Cells are already checked for finiteness; only emptiness is left.
            let ts = TimeSeries::new(values).map_err(|e| match e {
                DtwError::EmptySeries => IoError::EmptySeries {
                    path: self.path.clone(),
                    series_id: id.clone(),
                },
                source => IoError::InvalidSeries {
                    path: self.path.clone(),
                    series_id: id.clone(),
                    source,
                },
            })?;

            ids.push(SeriesId::new(id));
            series.push(ts);
        }

        if ids.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_series = ids.len(),
            max_len = series.iter().map(TimeSeries::len).max().unwrap_or(0),
            "series loaded"
        );

        Ok(SeriesTable::new(ids, series))
    }

    fn parse_values(
        &self,
        record: &csv::StringRecord,
        row_index: usize,
        id: &str,
    ) -> Result<Vec<f64>, IoError> {
        let cells: Vec<&str> = record.iter().skip(1).collect();
        let len = cells.iter().rposition(|c| !c.is_empty()).map_or(0, |p| p + 1);

        let mut values = Vec::with_capacity(len);
        for (col_index, raw) in cells[..len].iter().enumerate() {
            if raw.is_empty() {
                return Err(IoError::GapInSeries {
                    path: self.path.clone(),
                    series_id: id.to_string(),
                    col_index,
                });
            }
            let value: f64 = raw.parse().map_err(|_| IoError::NonFiniteValue {
                path: self.path.clone(),
                row_index,
                col_index,
                raw: raw.to_string(),
            })?;
            if !value.is_finite() {
                return Err(IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index,
                    raw: raw.to_string(),
                });
            }
            values.push(value);
        }
        Ok(values)
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}

//! Domain types for warpskill-io.

use warpskill_dtw::TimeSeries;

use crate::IoError;

/// Identifier of one series, parsed from the first column of the input CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesId(String);

impl SeriesId {
    pub(crate) fn new(id: String) -> Self {
        debug_assert!(!id.is_empty(), "series ID must not be empty");
        Self(id)
    }

    /// Return the series ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named time series loaded from one CSV file.
///
/// Produced by [`SeriesReader`](crate::SeriesReader). IDs and series are
/// stored in parallel vectors in CSV row order: `ids[i]` names `series[i]`.
#[derive(Debug)]
pub struct SeriesTable {
    ids: Vec<SeriesId>,
    series: Vec<TimeSeries>,
}

impl SeriesTable {
    pub(crate) fn new(ids: Vec<SeriesId>, series: Vec<TimeSeries>) -> Self {
        debug_assert_eq!(ids.len(), series.len());
        Self { ids, series }
    }

    /// Return the series IDs in row order.
    #[must_use]
    pub fn ids(&self) -> &[SeriesId] {
        &self.ids
    }

    /// Return the series in row order.
    #[must_use]
    pub fn series(&self) -> &[TimeSeries] {
        &self.series
    }

    /// Return the number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Return true if the table holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Look up a series by ID.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownSeries`] if no row carries `id`.
    pub fn get(&self, id: &str) -> Result<&TimeSeries, IoError> {
        self.ids
            .iter()
            .position(|s| s.as_str() == id)
            .map(|i| &self.series[i])
            .ok_or_else(|| IoError::UnknownSeries {
                series_id: id.to_string(),
                available: self
                    .ids
                    .iter()
                    .map(SeriesId::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SeriesTable {
        SeriesTable::new(
            vec![SeriesId::new("wind".into()), SeriesId::new("euhforia".into())],
            vec![
                TimeSeries::new(vec![400.0, 410.0]).unwrap(),
                TimeSeries::new(vec![390.0]).unwrap(),
            ],
        )
    }

    #[test]
    fn series_id_as_str_returns_inner() {
        let id = SeriesId::new("wind".to_string());
        assert_eq!(id.as_str(), "wind");
        assert_eq!(id.to_string(), "wind");
    }

    #[test]
    fn get_by_id() {
        let t = table();
        assert_eq!(t.get("euhforia").unwrap().as_ref(), &[390.0]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn unknown_id_lists_available() {
        let err = table().get("persistence").unwrap_err();
        match err {
            IoError::UnknownSeries { series_id, available } => {
                assert_eq!(series_id, "persistence");
                assert_eq!(available, "wind, euhforia");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

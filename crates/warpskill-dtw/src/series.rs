//! Time series types.

use std::fmt;
use std::ops::Index;

use crate::error::DtwError;

/// The role a series plays in an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesRole {
    /// The measured series every other series is compared against.
    Observed,
    /// A modelled series under evaluation.
    Model,
    /// The baseline series used to normalize the skill score.
    Reference,
}

impl fmt::Display for SeriesRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Observed => "observed",
            Self::Model => "model",
            Self::Reference => "reference",
        })
    }
}

/// Owned time series. Guaranteed non-empty.
///
/// Values are not checked for finiteness: NaN or infinite samples flow through
/// the recurrence unchanged. Use [`TimeSeries::finite`] to reject them up front.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries(Vec<f64>);

impl TimeSeries {
    /// Create a new time series, validating that it is non-empty.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `values` is empty |
    pub fn new(values: Vec<f64>) -> Result<Self, DtwError> {
        if values.is_empty() {
            return Err(DtwError::EmptySeries);
        }
        Ok(Self(values))
    }

    /// Create a new time series, additionally rejecting NaN and infinite values.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `values` is empty |
    /// | [`DtwError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn finite(values: Vec<f64>) -> Result<Self, DtwError> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(DtwError::NonFiniteValue { index });
        }
        Self::new(values)
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> TimeSeriesView<'_> {
        TimeSeriesView(&self.0)
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed series; provided alongside `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[f64]> for TimeSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Borrowed, non-empty view into a time series.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesView<'a>(&'a [f64]);

impl<'a> TimeSeriesView<'a> {
    /// Create a new view, validating that the slice is non-empty.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | `slice` is empty |
    pub fn new(slice: &'a [f64]) -> Result<Self, DtwError> {
        if slice.is_empty() {
            return Err(DtwError::EmptySeries);
        }
        Ok(Self(slice))
    }

    /// Return the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.0
    }

    /// Return the number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a constructed view; provided alongside `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for TimeSeriesView<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[f64]> for TimeSeriesView<'_> {
    fn as_ref(&self) -> &[f64] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_vec() {
        let result = TimeSeries::new(vec![]);
        assert!(matches!(result, Err(DtwError::EmptySeries)));
    }

    #[test]
    fn keeps_nan_values() {
        let ts = TimeSeries::new(vec![1.0, f64::NAN, 3.0]).unwrap();
        assert!(ts.as_ref()[1].is_nan());
    }

    #[test]
    fn finite_rejects_nan() {
        let result = TimeSeries::finite(vec![1.0, f64::NAN, 3.0]);
        assert!(matches!(result, Err(DtwError::NonFiniteValue { index: 1 })));
    }

    #[test]
    fn finite_rejects_neg_infinity() {
        let result = TimeSeries::finite(vec![f64::NEG_INFINITY, 2.0]);
        assert!(matches!(result, Err(DtwError::NonFiniteValue { index: 0 })));
    }

    #[test]
    fn finite_rejects_empty() {
        assert!(matches!(TimeSeries::finite(vec![]), Err(DtwError::EmptySeries)));
    }

    #[test]
    fn accepts_valid_series() {
        let ts = TimeSeries::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.as_ref(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn view_rejects_empty() {
        let result = TimeSeriesView::new(&[]);
        assert!(matches!(result, Err(DtwError::EmptySeries)));
    }

    #[test]
    fn view_indexing() {
        let data = [10.0, 20.0, 30.0];
        let view = TimeSeriesView::new(&data).unwrap();
        assert_eq!(view[0], 10.0);
        assert_eq!(view[2], 30.0);
    }

    #[test]
    fn role_display() {
        assert_eq!(SeriesRole::Observed.to_string(), "observed");
        assert_eq!(SeriesRole::Reference.to_string(), "reference");
    }
}

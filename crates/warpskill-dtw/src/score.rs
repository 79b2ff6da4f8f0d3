//! DTW score newtype wrapper.

use std::cmp::Ordering;
use std::fmt;

/// Minimal cumulative alignment cost between two series.
///
/// Non-negative for finite inputs. `+inf` when the terminal cell lies outside
/// the band; NaN when a NaN sample reached the terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize)]
#[serde(transparent)]
pub struct DtwScore(f64);

impl DtwScore {
    /// Infinite score, the value of every unreachable table cell.
    pub const INFINITY: Self = Self(f64::INFINITY);

    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw score value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Return true if the score is exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for DtwScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

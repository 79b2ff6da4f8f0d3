//! Band constraint types for DTW computation.

use std::ops::Range;

use crate::error::DtwError;

/// Minimum Sakoe-Chiba band width applied when none is configured.
pub const DEFAULT_MIN_BAND_WIDTH: usize = 300;

/// Constraint on the DTW warping window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandConstraint {
    /// No constraint: the full table is computed.
    Unconstrained,

    /// Sakoe-Chiba band whose width is `max(min_width, |n - m|)`.
    SakoeChiba {
        /// Lower bound on the resolved band width.
        min_width: usize,
    },
}

impl Default for BandConstraint {
    fn default() -> Self {
        Self::SakoeChiba {
            min_width: DEFAULT_MIN_BAND_WIDTH,
        }
    }
}

impl BandConstraint {
    /// Create a Sakoe-Chiba constraint with the given minimum width.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidBandWidth`] | `min_width` is zero |
    pub fn sakoe_chiba(min_width: usize) -> Result<Self, DtwError> {
        if min_width == 0 {
            return Err(DtwError::InvalidBandWidth { min_width });
        }
        Ok(Self::SakoeChiba { min_width })
    }

    /// Resolve the window for an `n`-long observed series against an `m`-long model.
    #[must_use]
    pub fn window(&self, n: usize, m: usize) -> BandWindow {
        let width = match self {
            Self::Unconstrained => None,
            Self::SakoeChiba { min_width } => Some((*min_width).max(n.abs_diff(m))),
        };
        BandWindow { n, m, width }
    }
}

/// A band constraint resolved against a concrete pair of series lengths.
///
/// Rows and columns here are 1-based table coordinates: row `i` pairs with
/// observed index `i - 1`, column `j` with model index `j - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandWindow {
    n: usize,
    m: usize,
    width: Option<usize>,
}

impl BandWindow {
    /// Return the resolved band width, or `None` when unconstrained.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Return the observed series length.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.n
    }

    /// Return the model series length.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.m
    }

    /// Return the admissible 1-based column range for table row `i`.
    ///
    /// The range is `[max(1, i - w), min(m + 1, i + w))`. The upper bound is
    /// exclusive, so admissible offsets `j - i` lie in `[-w, w - 1]`.
    #[must_use]
    pub fn columns(&self, i: usize) -> Range<usize> {
        match self.width {
            None => 1..self.m + 1,
            Some(w) => {
                let start = i.saturating_sub(w).max(1);
                let end = (self.m + 1).min(i.saturating_add(w));
                start..end.max(start)
            }
        }
    }

    /// Return true if the 0-based cell `(real, model)` lies inside the band.
    #[must_use]
    pub fn contains(&self, real: usize, model: usize) -> bool {
        real < self.n && self.columns(real + 1).contains(&(model + 1))
    }

    /// Return true if every cell of the `n × m` grid is admissible.
    #[must_use]
    pub fn covers_all(&self) -> bool {
        match self.width {
            None => true,
            // Worst cases are the corners: (n, 1) needs n - w <= 1 and (1, m) needs m < 1 + w.
            Some(w) => self.n <= w.saturating_add(1) && self.m <= w,
        }
    }
}

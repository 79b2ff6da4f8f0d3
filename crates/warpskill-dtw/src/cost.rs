//! Pointwise cost matrix restricted to the band.

use std::ops::Index;

use crate::band::BandWindow;

/// Dense `n × m` matrix of absolute differences, indexed `[real][model]`.
///
/// Only in-band cells are written. Every other cell keeps its initial `0.0`,
/// and reading one returns that zero rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    window: BandWindow,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Fill the in-band cells with `|model[j] - real[i]|`.
    pub(crate) fn build(real: &[f64], model: &[f64], window: BandWindow) -> Self {
        let n = real.len();
        let m = model.len();
        debug_assert_eq!((n, m), (window.rows(), window.cols()));

        let mut data = vec![0.0; n * m];
        for i in 1..=n {
            let row = (i - 1) * m;
            for j in window.columns(i) {
                data[row + j - 1] = (model[j - 1] - real[i - 1]).abs();
            }
        }
        Self { window, data }
    }

    /// Return the number of rows (observed series length).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.window.rows()
    }

    /// Return the number of columns (model series length).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.window.cols()
    }

    /// Return the band window this matrix was built with.
    #[must_use]
    pub fn window(&self) -> BandWindow {
        self.window
    }

    /// Return the cost of pairing observed index `real` with model index `model`.
    ///
    /// # Panics
    ///
    /// Panics if `real >= rows()` or `model >= cols()`.
    #[must_use]
    pub fn get(&self, real: usize, model: usize) -> f64 {
        self[(real, model)]
    }

    /// Return one row of the matrix: the costs of observed index `real`
    /// against every model index.
    #[must_use]
    pub fn row(&self, real: usize) -> &[f64] {
        let m = self.cols();
        &self.data[real * m..(real + 1) * m]
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (real, model): (usize, usize)) -> &Self::Output {
        assert!(
            real < self.rows(),
            "row index {real} out of bounds for {} rows",
            self.rows()
        );
        assert!(
            model < self.cols(),
            "column index {model} out of bounds for {} columns",
            self.cols()
        );
        &self.data[real * self.cols() + model]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::BandConstraint;

    fn build(real: &[f64], model: &[f64], constraint: BandConstraint) -> CostMatrix {
        CostMatrix::build(real, model, constraint.window(real.len(), model.len()))
    }

    #[test]
    fn absolute_differences_inside_band() {
        let cost = build(&[1.0, 2.0], &[4.0, 0.5, 2.0], BandConstraint::default());
        assert_eq!(cost.rows(), 2);
        assert_eq!(cost.cols(), 3);
        assert_eq!(cost.row(0), &[3.0, 0.5, 1.0]);
        assert_eq!(cost.row(1), &[2.0, 1.5, 0.0]);
    }

    #[test]
    fn out_of_band_cells_stay_zero() {
        let narrow = BandConstraint::sakoe_chiba(1).unwrap();
        let cost = build(&[0.0, 0.0, 0.0], &[9.0, 9.0, 9.0], narrow);
        // Row 0 only admits model index 0.
        assert_eq!(cost.get(0, 0), 9.0);
        assert_eq!(cost.get(0, 1), 0.0);
        assert_eq!(cost.get(0, 2), 0.0);
        // Row 2 admits model indices 1 and 2.
        assert_eq!(cost.get(2, 0), 0.0);
        assert_eq!(cost.get(2, 1), 9.0);
        assert_eq!(cost.get(2, 2), 9.0);
    }

    #[test]
    fn index_matches_get() {
        let cost = build(&[1.0, 5.0], &[2.0, 3.0], BandConstraint::Unconstrained);
        assert_eq!(cost[(1, 0)], cost.get(1, 0));
        assert_eq!(cost[(1, 0)], 3.0);
    }

    #[test]
    fn nan_sample_propagates_into_cost() {
        let cost = build(&[f64::NAN], &[1.0], BandConstraint::default());
        assert!(cost.get(0, 0).is_nan());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_read_panics() {
        let cost = build(&[1.0], &[1.0, 2.0], BandConstraint::default());
        let _ = cost.get(1, 0);
    }
}

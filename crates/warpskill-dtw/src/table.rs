//! Accumulated-cost table and the banded DTW recurrence.

use crate::band::BandWindow;
use crate::cost::CostMatrix;
use crate::score::DtwScore;

/// Minimal cumulative cost table of size `(n + 1) × (m + 1)`.
///
/// The seeded table has `+inf` everywhere except `raw(0, 0) == 0`. The
/// alignment view [`get`][Self::get] drops the seed row and column through an
/// index offset: `get(i, j) == raw(i + 1, j + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedCost {
    n: usize,
    m: usize,
    data: Vec<f64>,
}

impl AccumulatedCost {
    fn seeded(n: usize, m: usize) -> Self {
        let mut data = vec![f64::INFINITY; (n + 1) * (m + 1)];
        data[0] = 0.0;
        Self { n, m, data }
    }

    /// Run the recurrence over every in-band cell of `cost`.
    pub(crate) fn accumulate(cost: &CostMatrix) -> Self {
        let window = cost.window();
        let (n, m) = (cost.rows(), cost.cols());
        let stride = m + 1;
        let mut table = Self::seeded(n, m);

        for i in 1..=n {
            let row = i * stride;
            let above = row - stride;
            for j in window.columns(i) {
                let best = min3(
                    table.data[above + j - 1],
                    table.data[above + j],
                    table.data[row + j - 1],
                );
                table.data[row + j] = best + cost[(i - 1, j - 1)];
            }
        }
        table
    }

    /// Return the observed series length `n`.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.n
    }

    /// Return the model series length `m`.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.m
    }

    /// Read the seeded table, `0 <= i <= n`, `0 <= j <= m`.
    ///
    /// # Panics
    ///
    /// Panics if either index is past the table edge.
    #[must_use]
    pub fn raw(&self, i: usize, j: usize) -> f64 {
        assert!(
            i <= self.n && j <= self.m,
            "cell ({i}, {j}) out of bounds for {}x{} table",
            self.n + 1,
            self.m + 1
        );
        self.data[i * (self.m + 1) + j]
    }

    /// Read the seed-dropped table, `0 <= i < n`, `0 <= j < m`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n` or `j >= m`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.n && j < self.m,
            "cell ({i}, {j}) out of bounds for {}x{} alignment table",
            self.n,
            self.m
        );
        self.raw(i + 1, j + 1)
    }

    /// Return the DTW score, the terminal cell `raw(n, m)`.
    #[must_use]
    pub fn score(&self) -> DtwScore {
        DtwScore::new(self.raw(self.n, self.m))
    }
}

/// Same recurrence as [`AccumulatedCost::accumulate`], holding only two rows.
///
/// Each row has `m + 1` slots and is reset to `+inf` before filling, so cells
/// outside the band read exactly as they would in the full table and the
/// result is bit-identical.
pub(crate) fn rolling_score(real: &[f64], model: &[f64], window: BandWindow) -> DtwScore {
    let m = model.len();
    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;

    for i in 1..=real.len() {
        curr.fill(f64::INFINITY);
        let r = real[i - 1];
        for j in window.columns(i) {
            let best = min3(prev[j - 1], prev[j], curr[j - 1]);
            curr[j] = best + (model[j - 1] - r).abs();
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    DtwScore::new(prev[m])
}

/// Minimum of the diagonal, above and left predecessors.
#[inline]
pub(crate) fn min3(diag: f64, above: f64, left: f64) -> f64 {
    diag.min(above).min(left)
}

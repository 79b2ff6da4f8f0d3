//! Warping path types and backtracking over the accumulated-cost table.

use tracing::debug;

use crate::cost::CostMatrix;
use crate::score::DtwScore;
use crate::table::{AccumulatedCost, min3};

/// A single alignment pair, mapping model index `model` to observed index `real`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct WarpingStep {
    /// Index in the model series.
    pub model: usize,
    /// Index in the observed series.
    pub real: usize,
}

/// Alignment pairs ordered from the terminal pair `(m-1, n-1)` back to `(0, 0)`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    /// Return the warping steps as a slice, terminal pair first.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the steps in origin-first order.
    pub fn iter_forward(&self) -> impl DoubleEndedIterator<Item = &WarpingStep> + '_ {
        self.0.iter().rev()
    }
}

/// Optimal alignment of an observed series against a model series.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Alignment {
    /// Terminal cell of the accumulated-cost table.
    pub score: DtwScore,
    /// Backtracked alignment path.
    pub path: WarpingPath,
    /// Sum of pointwise costs along `path`, recomputed independently of `score`.
    pub path_cost: f64,
}

/// Backtrack from the terminal cell to the origin.
///
/// `table` and `cost` must come from the same invocation. Ties between
/// predecessors resolve up, then left, then diagonal.
pub(crate) fn reconstruct(table: &AccumulatedCost, cost: &CostMatrix) -> Alignment {
    let n = table.rows();
    let m = table.cols();
    let mut i = n - 1;
    let mut j = m - 1;

    let mut steps = Vec::with_capacity(n + m - 1);
    steps.push(WarpingStep { model: j, real: i });

    while i > 0 || j > 0 {
        if i == 0 {
            j -= 1;
        } else if j == 0 {
            i -= 1;
        } else {
            let above = table.get(i - 1, j);
            let left = table.get(i, j - 1);
            let best = min3(table.get(i - 1, j - 1), above, left);
            if above == best {
                i -= 1;
            } else if left == best {
                j -= 1;
            } else {
                i -= 1;
                j -= 1;
            }
        }
        steps.push(WarpingStep { model: j, real: i });
    }

    let path_cost = steps.iter().map(|s| cost.get(s.real, s.model)).sum();
    debug!(steps = steps.len(), path_cost, "warping path reconstructed");

    Alignment {
        score: table.score(),
        path: WarpingPath(steps),
        path_cost,
    }
}

//! Banded DTW scoring, alignment and skill scores.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::band::{BandConstraint, BandWindow};
use crate::cost::CostMatrix;
use crate::error::DtwError;
use crate::evaluation::Evaluation;
use crate::path::{Alignment, reconstruct};
use crate::score::DtwScore;
use crate::series::{SeriesRole, TimeSeriesView};
use crate::skill::SkillScore;
use crate::table::{AccumulatedCost, rolling_score};

/// Immutable DTW configuration. Thread-safe and copyable.
///
/// Every operation allocates its own matrices, so one `Dtw` can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw {
    constraint: BandConstraint,
}

impl Dtw {
    /// Create a DTW calculator from a [`BandConstraint`].
    #[must_use]
    pub fn new(constraint: BandConstraint) -> Self {
        Self { constraint }
    }

    /// Create an unconstrained DTW calculator.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::new(BandConstraint::Unconstrained)
    }

    /// Create a DTW calculator whose band width is `max(min_width, |n - m|)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::InvalidBandWidth`] | `min_width` is zero |
    pub fn with_min_band_width(min_width: usize) -> Result<Self, DtwError> {
        Ok(Self::new(BandConstraint::sakoe_chiba(min_width)?))
    }

    /// Return the band constraint configuration.
    #[must_use]
    pub fn constraint(&self) -> BandConstraint {
        self.constraint
    }

    fn window(&self, real: TimeSeriesView<'_>, model: TimeSeriesView<'_>) -> BandWindow {
        let window = self.constraint.window(real.len(), model.len());
        debug!(
            n = real.len(),
            m = model.len(),
            width = ?window.width(),
            "band resolved"
        );
        window
    }

    /// Build the pointwise cost matrix `|model[j] - real[i]|` inside the band.
    #[must_use]
    #[instrument(skip_all, fields(n = real.len(), m = model.len()))]
    pub fn cost_matrix(&self, real: TimeSeriesView<'_>, model: TimeSeriesView<'_>) -> CostMatrix {
        CostMatrix::build(real.as_slice(), model.as_slice(), self.window(real, model))
    }

    /// Fill the accumulated-cost table from a cost matrix.
    ///
    /// Uses the band the matrix was built with.
    #[must_use]
    pub fn accumulate(&self, cost: &CostMatrix) -> AccumulatedCost {
        AccumulatedCost::accumulate(cost)
    }

    /// Compute the DTW score of `model` against `real`.
    ///
    /// Runs in O(n * bw) time with two rolling rows of `m + 1` cells rather
    /// than the full table. Returns the same value as
    /// `accumulate(&cost_matrix(real, model)).score()`.
    #[must_use]
    #[instrument(skip_all, fields(n = real.len(), m = model.len()))]
    pub fn score(&self, real: TimeSeriesView<'_>, model: TimeSeriesView<'_>) -> DtwScore {
        rolling_score(real.as_slice(), model.as_slice(), self.window(real, model))
    }

    /// Compute the DTW score together with the backtracked alignment path.
    ///
    /// Builds the full `(n + 1) × (m + 1)` table. Use [`score`][Dtw::score]
    /// when only the scalar is needed.
    #[must_use]
    #[instrument(skip_all, fields(n = real.len(), m = model.len()))]
    pub fn align(&self, real: TimeSeriesView<'_>, model: TimeSeriesView<'_>) -> Alignment {
        let cost = self.cost_matrix(real, model);
        let table = self.accumulate(&cost);
        reconstruct(&table, &cost)
    }

    /// Compute the skill score of `model` relative to `reference`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroReferenceScore`] | `reference` aligns to `real` at zero cost |
    #[instrument(skip_all, fields(n = real.len(), m = model.len(), r = reference.len()))]
    pub fn skill_score(
        &self,
        real: TimeSeriesView<'_>,
        model: TimeSeriesView<'_>,
        reference: TimeSeriesView<'_>,
    ) -> Result<SkillScore, DtwError> {
        let model_score = self.scored(real, model, SeriesRole::Model);
        let reference_score = self.scored(real, reference, SeriesRole::Reference);
        SkillScore::from_scores(model_score, reference_score)
    }

    /// Compute skill scores for an ensemble of models against one observation.
    ///
    /// The reference score is computed once; models are scored in parallel
    /// with rayon. Output order matches `models`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroReferenceScore`] | `reference` aligns to `real` at zero cost; carries the first model's score |
    #[instrument(skip_all, fields(n = real.len(), models = models.len()))]
    pub fn skill_scores(
        &self,
        real: TimeSeriesView<'_>,
        models: &[TimeSeriesView<'_>],
        reference: TimeSeriesView<'_>,
    ) -> Result<Vec<SkillScore>, DtwError> {
        let Some(&first) = models.first() else {
            return Ok(Vec::new());
        };
        let reference_score = self.scored(real, reference, SeriesRole::Reference);
        if reference_score.is_zero() {
            return Err(DtwError::ZeroReferenceScore {
                model_score: self.score(real, first).value(),
            });
        }

        models
            .par_iter()
            .map(|&model| {
                SkillScore::from_scores(self.scored(real, model, SeriesRole::Model), reference_score)
            })
            .collect()
    }

    /// Align `model` against `real` and, when a reference is given, score its skill.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroReferenceScore`] | `reference` aligns to `real` at zero cost |
    #[instrument(skip_all, fields(n = real.len(), m = model.len()))]
    pub fn evaluate(
        &self,
        real: TimeSeriesView<'_>,
        model: TimeSeriesView<'_>,
        reference: Option<TimeSeriesView<'_>>,
    ) -> Result<Evaluation, DtwError> {
        let alignment = self.align(real, model);
        let skill = reference
            .map(|r| {
                let reference_score = self.scored(real, r, SeriesRole::Reference);
                SkillScore::from_scores(alignment.score, reference_score)
            })
            .transpose()?;
        Ok(Evaluation::new(alignment, skill))
    }

    fn scored(
        &self,
        real: TimeSeriesView<'_>,
        other: TimeSeriesView<'_>,
        role: SeriesRole,
    ) -> DtwScore {
        let score = self.score(real, other);
        debug!(%role, score = score.value(), "scored against observation");
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::TimeSeries;

    fn ts(values: &[f64]) -> TimeSeries {
        TimeSeries::new(values.to_vec()).unwrap()
    }

    #[test]
    fn identical_series_score_zero() {
        let dtw = Dtw::default();
        let a = ts(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(dtw.score(a.as_view(), a.as_view()).value(), 0.0);
    }

    #[test]
    fn constant_offset_scores_one_per_step() {
        let dtw = Dtw::default();
        let real = ts(&[0.0, 0.0, 0.0]);
        let model = ts(&[1.0, 1.0, 1.0]);
        assert_eq!(dtw.score(real.as_view(), model.as_view()).value(), 3.0);
    }

    #[test]
    fn single_element_series() {
        let dtw = Dtw::default();
        let a = ts(&[5.0]);
        let b = ts(&[3.0]);
        assert_eq!(dtw.score(a.as_view(), b.as_view()).value(), 2.0);
    }

    #[test]
    fn score_matches_align() {
        let dtw = Dtw::default();
        let a = ts(&[1.0, 3.0, 5.0, 2.0]);
        let b = ts(&[2.0, 4.0, 1.0]);
        let score = dtw.score(a.as_view(), b.as_view());
        let alignment = dtw.align(a.as_view(), b.as_view());
        assert_eq!(score, alignment.score);
    }

    #[test]
    fn cost_and_accumulate_compose_to_score() {
        let dtw = Dtw::with_min_band_width(2).unwrap();
        let a = ts(&[0.0, 4.0, 1.0, 3.0, 3.0]);
        let b = ts(&[1.0, 1.0, 4.0, 2.0]);
        let cost = dtw.cost_matrix(a.as_view(), b.as_view());
        let table = dtw.accumulate(&cost);
        assert_eq!(table.score(), dtw.score(a.as_view(), b.as_view()));
    }

    #[test]
    fn band_distance_geq_unconstrained() {
        let a = ts(&[0.0, 1.0, 0.0, 1.0, 0.0, 6.0]);
        let b = ts(&[6.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let unconstrained = Dtw::unconstrained().score(a.as_view(), b.as_view());
        let banded = Dtw::with_min_band_width(1).unwrap().score(a.as_view(), b.as_view());
        assert!(banded.value() >= unconstrained.value());
    }

    #[test]
    fn max_band_width_matches_unconstrained() {
        let dtw = Dtw::with_min_band_width(usize::MAX).unwrap();
        let real = ts(&[0.0, 0.0, 0.0]);
        let model = ts(&[1.0, 1.0, 1.0]);
        let banded = dtw.score(real.as_view(), model.as_view());
        assert_eq!(banded.value(), 3.0);
        assert_eq!(banded, Dtw::unconstrained().score(real.as_view(), model.as_view()));
        assert_eq!(dtw.align(real.as_view(), model.as_view()).path.len(), 3);
    }

    #[test]
    fn zero_min_band_width_rejected() {
        assert!(matches!(
            Dtw::with_min_band_width(0),
            Err(DtwError::InvalidBandWidth { min_width: 0 })
        ));
    }

    #[test]
    fn skill_score_ratio() {
        let dtw = Dtw::default();
        let real = ts(&[0.0, 0.0, 0.0]);
        let model = ts(&[1.0, 1.0, 1.0]);
        let reference = ts(&[2.0, 2.0, 2.0]);
        let s = dtw
            .skill_score(real.as_view(), model.as_view(), reference.as_view())
            .unwrap();
        assert_eq!(s.model_score.value(), 3.0);
        assert_eq!(s.reference_score.value(), 6.0);
        assert_eq!(s.value, 0.5);
    }

    #[test]
    fn perfect_model_skill_is_zero() {
        let dtw = Dtw::default();
        let real = ts(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let reference = ts(&[3.0, 3.0, 3.0, 3.0, 3.0]);
        let s = dtw
            .skill_score(real.as_view(), real.as_view(), reference.as_view())
            .unwrap();
        assert_eq!(s.value, 0.0);
    }

    #[test]
    fn reference_equal_to_observation_is_an_error() {
        let dtw = Dtw::default();
        let real = ts(&[1.0, 2.0, 3.0]);
        let model = ts(&[2.0, 2.0, 2.0]);
        let result = dtw.skill_score(real.as_view(), model.as_view(), real.as_view());
        assert!(matches!(result, Err(DtwError::ZeroReferenceScore { .. })));
    }

    #[test]
    fn ensemble_matches_individual_scores() {
        let dtw = Dtw::default();
        let real = ts(&[0.0, 1.0, 2.0, 1.0, 0.0]);
        let reference = ts(&[0.5, 0.5, 0.5, 0.5, 0.5]);
        let models = [
            ts(&[0.0, 1.0, 2.0, 1.0, 0.0]),
            ts(&[0.0, 0.0, 1.0, 2.0, 1.0, 0.0]),
            ts(&[3.0, 3.0, 3.0]),
        ];
        let views: Vec<_> = models.iter().map(TimeSeries::as_view).collect();
        let batch = dtw
            .skill_scores(real.as_view(), &views, reference.as_view())
            .unwrap();
        assert_eq!(batch.len(), 3);
        for (model, skill) in models.iter().zip(&batch) {
            let single = dtw
                .skill_score(real.as_view(), model.as_view(), reference.as_view())
                .unwrap();
            assert_eq!(&single, skill);
        }
    }

    #[test]
    fn ensemble_rejects_zero_reference() {
        let dtw = Dtw::default();
        let real = ts(&[1.0, 2.0]);
        let model = ts(&[3.0, 4.0]);
        let result = dtw.skill_scores(real.as_view(), &[model.as_view()], real.as_view());
        assert_eq!(
            result,
            Err(DtwError::ZeroReferenceScore { model_score: 4.0 })
        );
    }

    #[test]
    fn evaluate_without_reference() {
        let dtw = Dtw::default();
        let real = ts(&[0.0, 0.0, 0.0]);
        let model = ts(&[1.0, 1.0, 1.0]);
        let eval = dtw.evaluate(real.as_view(), model.as_view(), None).unwrap();
        assert_eq!(eval.score.value(), 3.0);
        assert_eq!(eval.path_cost, 3.0);
        assert!(eval.skill.is_none());
        assert_eq!(eval.path.len(), 3);
    }

    #[test]
    fn evaluate_with_reference() {
        let dtw = Dtw::default();
        let real = ts(&[0.0, 0.0, 0.0]);
        let model = ts(&[1.0, 1.0, 1.0]);
        let reference = ts(&[4.0, 4.0, 4.0]);
        let eval = dtw
            .evaluate(real.as_view(), model.as_view(), Some(reference.as_view()))
            .unwrap();
        assert_eq!(eval.skill.unwrap().value, 0.25);
    }

    #[test]
    fn evaluate_propagates_zero_reference() {
        let dtw = Dtw::default();
        let real = ts(&[0.0, 1.0]);
        let model = ts(&[1.0, 1.0]);
        let result = dtw.evaluate(real.as_view(), model.as_view(), Some(real.as_view()));
        assert!(matches!(result, Err(DtwError::ZeroReferenceScore { .. })));
    }

    #[test]
    fn nan_sample_surfaces_in_score() {
        let dtw = Dtw::default();
        let real = ts(&[f64::NAN]);
        let model = ts(&[1.0]);
        assert!(dtw.score(real.as_view(), model.as_view()).value().is_nan());
    }
}

//! Skill score: model DTW cost normalized by a reference scenario's DTW cost.

use std::fmt;

use crate::error::DtwError;
use crate::score::DtwScore;

/// Ratio of the model's DTW score to the reference's DTW score against the
/// same observation. Lower is better; `1.0` means no better than the reference.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SkillScore {
    /// DTW score of the model against the observation.
    pub model_score: DtwScore,
    /// DTW score of the reference against the observation.
    pub reference_score: DtwScore,
    /// `model_score / reference_score`.
    pub value: f64,
}

impl SkillScore {
    /// Divide the model score by the reference score.
    ///
    /// Non-finite scores are divided as-is, so an infinite or NaN score
    /// surfaces in `value` rather than being masked.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroReferenceScore`] | `reference` is exactly zero |
    pub fn from_scores(model: DtwScore, reference: DtwScore) -> Result<Self, DtwError> {
        if reference.is_zero() {
            return Err(DtwError::ZeroReferenceScore {
                model_score: model.value(),
            });
        }
        Ok(Self {
            model_score: model,
            reference_score: reference,
            value: model.value() / reference.value(),
        })
    }
}

impl fmt::Display for SkillScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.value)
    }
}

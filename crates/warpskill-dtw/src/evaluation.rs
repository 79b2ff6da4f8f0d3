//! Structured evaluation result handed to renderers.

use crate::path::{Alignment, WarpingPath};
use crate::score::DtwScore;
use crate::skill::SkillScore;

/// Everything computed for one observed/model pair, as plain data.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Evaluation {
    /// DTW score of the model against the observation.
    pub score: DtwScore,
    /// Skill score against the reference, when a reference was supplied.
    pub skill: Option<SkillScore>,
    /// Alignment path, terminal pair first.
    pub path: WarpingPath,
    /// Pointwise cost summed along `path`.
    pub path_cost: f64,
}

impl Evaluation {
    pub(crate) fn new(alignment: Alignment, skill: Option<SkillScore>) -> Self {
        Self {
            score: alignment.score,
            skill,
            path: alignment.path,
            path_cost: alignment.path_cost,
        }
    }
}

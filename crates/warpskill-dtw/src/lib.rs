//! Banded DTW alignment cost, path reconstruction and skill score.
//!
//! Pure math library — zero I/O. Computes the Sakoe-Chiba banded Dynamic
//! Time Warping score between an observed and a modelled series, backtracks
//! the optimal alignment path, and normalizes a model's score against a
//! reference scenario to obtain a skill score.

mod band;
mod cost;
mod dtw;
mod error;
mod evaluation;
mod path;
mod score;
mod series;
mod skill;
mod table;

pub use band::{BandConstraint, BandWindow, DEFAULT_MIN_BAND_WIDTH};
pub use cost::CostMatrix;
pub use dtw::Dtw;
pub use error::DtwError;
pub use evaluation::Evaluation;
pub use path::{Alignment, WarpingPath, WarpingStep};
pub use score::DtwScore;
pub use series::{SeriesRole, TimeSeries, TimeSeriesView};
pub use skill::SkillScore;
pub use table::AccumulatedCost;

//! Error types for DTW scoring and skill-score computation.

/// Errors from series validation, band configuration, and skill scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a time series.
    #[error("time series must be non-empty")]
    EmptySeries,

    /// Returned by the strict constructor when a value is NaN or infinite.
    #[error("time series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when a Sakoe-Chiba band is configured with a zero minimum width.
    #[error("band width must be at least 1, got {min_width}")]
    InvalidBandWidth {
        /// The rejected minimum width.
        min_width: usize,
    },

    /// Returned when the reference DTW score is exactly zero, so the skill
    /// score ratio is undefined.
    #[error("reference DTW score is zero; skill score is undefined (model score {model_score})")]
    ZeroReferenceScore {
        /// DTW score of the model against the observation.
        model_score: f64,
    },
}

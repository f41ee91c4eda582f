use thiserror::Error;

/// Reasons an [`FxConfig`](super::config::FxConfig) can be rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    /// The typewriter needs at least one phrase to cycle through.
    #[error("typewriter phrase list is empty")]
    NoPhrases,

    /// A tick interval of zero would spin the timer queue.
    #[error("typewriter interval `{field}` must be greater than zero")]
    ZeroInterval { field: &'static str },

    /// Intersection ratios live in [0, 1].
    #[error("reveal threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f32),
}

use thiserror::Error;

/// Construction-time failures: bad config or incomplete animation data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("asset manifest has no `{0}` section")]
    MissingEntity(String),

    #[error("asset manifest section `{entity}` has no `{animation}` animation")]
    MissingAnimation { entity: String, animation: String },

    #[error("animation `{entity}.{animation}` has no frames")]
    EmptyAnimation { entity: String, animation: String },

    #[error("animation `{entity}.{animation}` needs {expected} frames, found {found}")]
    FrameCount {
        entity: String,
        animation: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid config value `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

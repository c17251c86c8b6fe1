//! Error type for catalog loading, lookups and progress ingestion

/// Errors raised by the achievement core
#[derive(Debug, thiserror::Error)]
pub enum AchievementError {
    #[error("Schema violation in achievement '{id}': {reason}")]
    SchemaViolation { id: String, reason: String },

    #[error("Unknown achievement: {0}")]
    NotFound(String),

    #[error("Invalid progress value {value} for achievement '{id}' (must be finite and >= 0)")]
    NegativeProgress { id: String, value: f64 },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AchievementError {
    pub(crate) fn schema(id: &str, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = AchievementError> = std::result::Result<T, E>;

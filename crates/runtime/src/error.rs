use progression_core::{ProgressionError, ValidationError};

/// Failures while assembling a wave run.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("failed to load content: {0}")]
    Content(String),

    #[error("unknown difficulty preset `{0}`")]
    UnknownDifficulty(String),

    #[error("starting skill `{0}` is not in the catalog")]
    UnknownStartingSkill(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl RuntimeError {
    /// Stable identifier for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Content(_) => "RUNTIME_CONTENT",
            Self::UnknownDifficulty(_) => "RUNTIME_UNKNOWN_DIFFICULTY",
            Self::UnknownStartingSkill(_) => "RUNTIME_UNKNOWN_STARTING_SKILL",
            Self::Validation(e) => e.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

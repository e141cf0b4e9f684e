//! Generation error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Prompt was empty after trimming whitespace. Nothing was sent.
    #[error("Please enter a prompt")]
    EmptyPrompt,

    /// The backend reported a failure for the current request.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

impl GenerationError {
    /// Short machine-readable kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::EmptyPrompt => "empty_prompt",
            GenerationError::GenerationFailed(_) => "generation_failed",
        }
    }
}

pub type GenerationOutcome<T> = Result<T, GenerationError>;

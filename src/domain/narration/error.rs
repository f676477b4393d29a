use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

/// Distinct reasons a narration can fail
#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("Story text and voice selection are required.")]
    Validation,
    #[error("Story text is too long.")]
    StoryTooLong,
    #[error("Failed to create Murf project.")]
    SynthesisFailed { details: Option<String> },
    #[error("Failed to export Murf project.")]
    ExportFailed { details: Option<String> },
    #[error("Murf audio export failed.")]
    ExportReportedFailure { details: Option<String> },
    #[error("Murf audio export timed out or failed to complete.")]
    ExportTimedOut { attempts: u32 },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(#[from] ProviderError),
}

impl NarrationError {
    /// Provider-supplied detail, if the provider gave one
    pub fn details(&self) -> Option<String> {
        match self {
            NarrationError::SynthesisFailed { details }
            | NarrationError::ExportFailed { details }
            | NarrationError::ExportReportedFailure { details } => details.clone(),
            NarrationError::Validation
            | NarrationError::StoryTooLong
            | NarrationError::ExportTimedOut { .. }
            | NarrationError::Unexpected(_) => None,
        }
    }

    /// Short machine-readable name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            NarrationError::Validation => "validation",
            NarrationError::StoryTooLong => "story_too_long",
            NarrationError::SynthesisFailed { .. } => "synthesis_failed",
            NarrationError::ExportFailed { .. } => "export_failed",
            NarrationError::ExportReportedFailure { .. } => "export_reported_failure",
            NarrationError::ExportTimedOut { .. } => "export_timed_out",
            NarrationError::Unexpected(_) => "unexpected",
        }
    }
}

impl From<NarrationError> for AppError {
    fn from(err: NarrationError) -> Self {
        match err {
            NarrationError::Validation | NarrationError::StoryTooLong => {
                AppError::BadRequest(err.to_string())
            }
            _ => AppError::ExternalService {
                kind: err.kind(),
                details: err.details(),
                message: err.to_string(),
            },
        }
    }
}

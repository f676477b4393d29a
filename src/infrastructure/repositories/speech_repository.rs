use crate::domain::narration::JobStatus;
use async_trait::async_trait;

/// Answer to a synthesis request.
///
/// Providers that render audio immediately fill `audio_file`; providers that
/// run a project/export lifecycle fill `project_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisResponse {
    pub project_id: Option<String>,
    pub audio_file: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResponse {
    pub export_id: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStatusReport {
    pub status: JobStatus,
    pub export_url: Option<String>,
    pub error_message: Option<String>,
}

impl ExportStatusReport {
    pub fn pending() -> Self {
        Self {
            status: JobStatus::Pending,
            export_url: None,
            error_message: None,
        }
    }

    pub fn completed(export_url: &str) -> Self {
        Self {
            status: JobStatus::Completed,
            export_url: Some(export_url.to_string()),
            error_message: None,
        }
    }

    pub fn failed(error_message: &str) -> Self {
        Self {
            status: JobStatus::Failed,
            export_url: None,
            error_message: Some(error_message.to_string()),
        }
    }
}

/// Failure talking to the speech provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("speech provider request failed: {0}")]
    Transport(String),
    #[error("speech provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode speech provider response: {0}")]
    Decode(String),
}

/// Repository for the remote speech provider.
/// Abstracts the provider's job lifecycle (synthesis, export, export status).
///
/// Implementations only translate calls to the wire; deciding what a missing
/// identifier or a pending status means is left to the caller.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Submit text for synthesis with the given provider voice
    async fn synthesize(&self, text: &str, voice_id: &str)
        -> Result<SynthesisResponse, ProviderError>;

    /// Request an export of a synthesized project
    async fn export(&self, project_id: &str) -> Result<ExportResponse, ProviderError>;

    /// Query the current state of an export
    async fn export_status(&self, export_id: &str) -> Result<ExportStatusReport, ProviderError>;
}

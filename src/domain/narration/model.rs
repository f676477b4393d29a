use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::NarrationError;

/// Validated narration input built from the submitted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationRequest {
    pub story_text: String,
    pub voice_id: String,
}

impl NarrationRequest {
    /// Build a request from raw form values.
    ///
    /// Both values must be present and contain something other than whitespace.
    pub fn new(story: Option<String>, voice: Option<String>) -> Result<Self, NarrationError> {
        let story_text = story.filter(|s| !s.trim().is_empty());
        let voice_id = voice
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match (story_text, voice_id) {
            (Some(story_text), Some(voice_id)) => Ok(Self {
                story_text,
                voice_id,
            }),
            _ => Err(NarrationError::Validation),
        }
    }
}

/// Export status as reported by the speech provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
    Failed,
    #[serde(other)]
    Pending,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            JobStatus::Pending => "pending",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        };
        write!(f, "{}", status)
    }
}

/// Provider-side job tracked for the lifetime of one narration request
#[derive(Debug, Clone)]
pub struct SynthesisJob {
    pub project_id: Option<String>,
    pub export_id: Option<String>,
    pub status: JobStatus,
    pub audio_url: Option<String>,
    pub polls: u32,
}

impl SynthesisJob {
    pub fn new() -> Self {
        Self {
            project_id: None,
            export_id: None,
            status: JobStatus::Pending,
            audio_url: None,
            polls: 0,
        }
    }

    pub fn record_poll(&mut self) {
        self.polls += 1;
    }

    /// Mark the job completed. The audio url only exists on a completed job.
    pub fn complete(&mut self, audio_url: String) {
        self.status = JobStatus::Completed;
        self.audio_url = Some(audio_url);
    }

    pub fn fail(&mut self) {
        self.status = JobStatus::Failed;
        self.audio_url = None;
    }
}

impl Default for SynthesisJob {
    fn default() -> Self {
        Self::new()
    }
}

/// Successful narration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationOutcome {
    pub audio_url: String,
    pub polls: u32,
    pub elapsed: Duration,
}

/// JSON body for a successful POST /narrate/
#[derive(Debug, Serialize)]
pub struct NarrationResponse {
    pub audio_urls: Vec<String>,
}

impl From<&NarrationOutcome> for NarrationResponse {
    fn from(outcome: &NarrationOutcome) -> Self {
        Self {
            audio_urls: vec![outcome.audio_url.clone()],
        }
    }
}

use super::error::NarrationError;
use super::model::{JobStatus, NarrationOutcome, NarrationRequest, SynthesisJob};
use crate::infrastructure::repositories::SpeechRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

/// How often and how many times an export is polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Longest time spent waiting between polls before giving up
    pub fn worst_case_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_POLL_ATTEMPTS)
    }
}

pub struct NarrationService {
    speech_repo: Arc<dyn SpeechRepository>,
    poll_policy: PollPolicy,
}

impl NarrationService {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>, poll_policy: PollPolicy) -> Self {
        Self {
            speech_repo,
            poll_policy,
        }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }
}

#[async_trait]
pub trait NarrationServiceApi: Send + Sync {
    /// Narrate a story with the requested voice
    ///
    /// This operation:
    /// - Submits the text for synthesis
    /// - Returns inline audio right away when the provider renders it directly
    /// - Otherwise exports the synthesized project and polls the export
    ///   until it completes, fails or runs out of attempts
    ///
    /// Returns the playable audio url along with polling metadata
    async fn narrate(&self, request: NarrationRequest) -> Result<NarrationOutcome, NarrationError>;
}

#[async_trait]
impl NarrationServiceApi for NarrationService {
    async fn narrate(&self, request: NarrationRequest) -> Result<NarrationOutcome, NarrationError> {
        let started = Instant::now();
        let mut job = SynthesisJob::new();

        tracing::info!(
            voice_id = %request.voice_id,
            text_length = request.story_text.len(),
            "Narration request"
        );

        // 1. Submit synthesis
        let synthesis = self
            .speech_repo
            .synthesize(&request.story_text, &request.voice_id)
            .await?;

        // 2. Inline audio skips the export lifecycle entirely
        let audio_url = if let Some(audio_url) = present(synthesis.audio_file) {
            tracing::info!("Provider returned inline audio");
            job.complete(audio_url.clone());
            audio_url
        } else {
            let project_id = present(synthesis.project_id).ok_or_else(|| {
                tracing::warn!(
                    details = ?synthesis.error_message,
                    "Synthesis returned no project or audio"
                );
                NarrationError::SynthesisFailed {
                    details: synthesis.error_message,
                }
            })?;
            job.project_id = Some(project_id.clone());

            // 3. Request export
            let export = self.speech_repo.export(&project_id).await?;
            let export_id = present(export.export_id).ok_or_else(|| {
                tracing::warn!(
                    project_id = %project_id,
                    details = ?export.error_message,
                    "Export returned no export id"
                );
                NarrationError::ExportFailed {
                    details: export.error_message,
                }
            })?;
            job.export_id = Some(export_id.clone());

            // 4. Poll until terminal
            self.poll_export(&mut job, &export_id).await?
        };

        let outcome = NarrationOutcome {
            audio_url,
            polls: job.polls,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            project_id = ?job.project_id,
            export_id = ?job.export_id,
            status = %job.status,
            polls = outcome.polls,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Narration completed"
        );

        Ok(outcome)
    }
}

impl NarrationService {
    /// Poll the export at a fixed interval until it reaches a terminal state
    /// or the attempt budget is spent. Every pending answer is followed by one
    /// interval, so the total wait never exceeds `PollPolicy::worst_case_wait`.
    async fn poll_export(
        &self,
        job: &mut SynthesisJob,
        export_id: &str,
    ) -> Result<String, NarrationError> {
        let PollPolicy {
            interval,
            max_attempts,
        } = self.poll_policy;

        for attempt in 1..=max_attempts {
            let report = self.speech_repo.export_status(export_id).await.map_err(|e| {
                tracing::error!(
                    export_id = export_id,
                    attempt = attempt,
                    error = %e,
                    "Export status check failed"
                );
                job.fail();
                NarrationError::from(e)
            })?;
            job.record_poll();

            match report.status {
                JobStatus::Completed => {
                    return match present(report.export_url) {
                        Some(url) => {
                            job.complete(url.clone());
                            Ok(url)
                        }
                        None => {
                            tracing::warn!(
                                export_id = export_id,
                                attempt = attempt,
                                "Export completed without an audio url"
                            );
                            job.fail();
                            Err(NarrationError::ExportTimedOut { attempts: attempt })
                        }
                    };
                }
                JobStatus::Failed => {
                    tracing::warn!(
                        export_id = export_id,
                        attempt = attempt,
                        details = ?report.error_message,
                        "Provider reported export failure"
                    );
                    job.fail();
                    return Err(NarrationError::ExportReportedFailure {
                        details: report.error_message,
                    });
                }
                JobStatus::Pending => {
                    tracing::debug!(
                        export_id = export_id,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        "Export still pending"
                    );
                    tokio::time::sleep(interval).await;
                }
            }
        }

        tracing::warn!(
            export_id = export_id,
            attempts = max_attempts,
            "Export did not complete within the polling budget"
        );
        job.fail();

        Err(NarrationError::ExportTimedOut {
            attempts: max_attempts,
        })
    }
}

/// Providers signal "no identifier" with either a missing or an empty string
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

use super::speech_repository::{
    ExportResponse, ExportStatusReport, ProviderError, SpeechRepository, SynthesisResponse,
};
use crate::domain::narration::JobStatus;
use crate::infrastructure::config::ProviderMode;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

const GENERATE_PATH: &str = "/v1/speech/generate";
const PROJECTS_PATH: &str = "/v1/projects";
const EXPORTS_PATH: &str = "/v1/exports";

/// Connection settings for the Murf API
#[derive(Debug, Clone)]
pub struct MurfSettings {
    pub api_key: String,
    pub base_url: String,
    pub mode: ProviderMode,
    pub audio_format: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateSpeechBody<'a> {
    text: &'a str,
    voice_id: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateSpeechReply {
    audio_file: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectBody<'a> {
    text: &'a str,
    voice_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectReply {
    project_id: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportProjectBody<'a> {
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportProjectReply {
    export_id: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportStatusReply {
    status: JobStatus,
    export_url: Option<String>,
    error_message: Option<String>,
}

/// Murf implementation of the speech repository
pub struct MurfSpeechRepository {
    http_client: reqwest::Client,
    settings: MurfSettings,
}

impl MurfSpeechRepository {
    pub fn new(settings: MurfSettings) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| {
                ProviderError::Transport(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// Send a request with the API key attached and decode the JSON reply
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ProviderError> {
        let response = request
            .header("api-key", &self.settings.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Murf API call failed");
                ProviderError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Murf API returned an error status"
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn generate_inline(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<SynthesisResponse, ProviderError> {
        let body = GenerateSpeechBody {
            text,
            voice_id,
            format: &self.settings.audio_format,
        };

        let reply: GenerateSpeechReply = self
            .send(self.http_client.post(self.url(GENERATE_PATH)).json(&body))
            .await?;

        Ok(SynthesisResponse {
            project_id: None,
            audio_file: reply.audio_file,
            error_message: reply.error_message,
        })
    }

    async fn create_project(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<SynthesisResponse, ProviderError> {
        let body = CreateProjectBody { text, voice_id };

        let reply: CreateProjectReply = self
            .send(self.http_client.post(self.url(PROJECTS_PATH)).json(&body))
            .await?;

        Ok(SynthesisResponse {
            project_id: reply.project_id,
            audio_file: None,
            error_message: reply.error_message,
        })
    }
}

#[async_trait]
impl SpeechRepository for MurfSpeechRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
    ) -> Result<SynthesisResponse, ProviderError> {
        tracing::info!(
            provider = "murf",
            mode = %self.settings.mode,
            voice_id = voice_id,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling Murf synthesis"
        );

        match self.settings.mode {
            ProviderMode::Inline => self.generate_inline(text, voice_id).await,
            ProviderMode::Export => self.create_project(text, voice_id).await,
        }
    }

    async fn export(&self, project_id: &str) -> Result<ExportResponse, ProviderError> {
        tracing::info!(
            project_id = project_id,
            format = %self.settings.audio_format,
            "Requesting Murf project export"
        );

        let path = format!(
            "{}/{}/export",
            PROJECTS_PATH,
            urlencoding::encode(project_id)
        );
        let body = ExportProjectBody {
            format: &self.settings.audio_format,
        };

        let reply: ExportProjectReply = self
            .send(self.http_client.post(self.url(&path)).json(&body))
            .await?;

        Ok(ExportResponse {
            export_id: reply.export_id,
            error_message: reply.error_message,
        })
    }

    async fn export_status(&self, export_id: &str) -> Result<ExportStatusReport, ProviderError> {
        let path = format!("{}/{}", EXPORTS_PATH, urlencoding::encode(export_id));

        let reply: ExportStatusReply = self.send(self.http_client.get(self.url(&path))).await?;

        tracing::debug!(
            export_id = export_id,
            status = %reply.status,
            "Murf export status received"
        );

        Ok(ExportStatusReport {
            status: reply.status,
            export_url: reply.export_url,
            error_message: reply.error_message,
        })
    }
}

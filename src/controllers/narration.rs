use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::pages::{render_index_page, Playback};
use crate::{
    domain::narration::{
        NarrationError, NarrationRequest, NarrationResponse, NarrationService,
        NarrationServiceApi, VoiceOption,
    },
    error::{AppError, AppResult},
    infrastructure::config::ResponseMode,
};

/// Form body for POST /narrate/
#[derive(Debug, Deserialize)]
pub struct NarrateForm {
    pub story: Option<String>,
    pub voice: Option<String>,
}

pub struct NarrationController {
    narration_service: Arc<NarrationService>,
    response_mode: ResponseMode,
    voices: Vec<VoiceOption>,
}

impl NarrationController {
    pub fn new(
        narration_service: Arc<NarrationService>,
        response_mode: ResponseMode,
        voices: Vec<VoiceOption>,
    ) -> Self {
        Self {
            narration_service,
            response_mode,
            voices,
        }
    }

    /// GET / - Landing page
    pub async fn index(State(controller): State<Arc<NarrationController>>) -> Html<String> {
        Html(render_index_page(
            &controller.voices,
            controller.response_mode,
            None,
        ))
    }

    /// POST /narrate/ - Narrate a story
    ///
    /// Returns either:
    /// - JSON with the audio urls (json mode)
    /// - The landing page with an embedded player (page mode)
    pub async fn narrate(
        State(controller): State<Arc<NarrationController>>,
        form: Result<Form<NarrateForm>, FormRejection>,
    ) -> AppResult<Response> {
        let form = match form {
            Ok(Form(form)) => form,
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!(error = %rejection, "Narration form over the body limit");
                return Err(NarrationError::StoryTooLong.into());
            }
            Err(rejection) => {
                tracing::warn!(error = %rejection, "Unreadable narration form");
                return Err(NarrationError::Validation.into());
            }
        };

        // Validate input before anything reaches the provider
        let request = NarrationRequest::new(form.story, form.voice)?;
        let story_text = request.story_text.clone();

        let outcome = controller.narration_service.narrate(request).await?;

        let response = match controller.response_mode {
            ResponseMode::Json => Json(NarrationResponse::from(&outcome)).into_response(),
            ResponseMode::Page => Html(render_index_page(
                &controller.voices,
                controller.response_mode,
                Some(Playback {
                    story_text: &story_text,
                    audio_url: &outcome.audio_url,
                }),
            ))
            .into_response(),
        };

        Ok(response)
    }

    /// Any other method on /narrate/
    pub async fn method_not_allowed() -> AppError {
        AppError::BadRequest("Invalid request method. Only POST is allowed.".to_string())
    }
}

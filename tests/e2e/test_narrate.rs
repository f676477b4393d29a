use crate::e2e::helpers;

use axum::http::{Method, StatusCode};
use helpers::provider_mocks::{MockSpeechRepository, AUDIO_URL};
use helpers::{TestContext, TEST_POLL_ATTEMPTS};
use narrator::domain::narration::JobStatus;
use narrator::infrastructure::config::ResponseMode;
use narrator::infrastructure::repositories::{
    ExportResponse, ExportStatusReport, ProviderError, SynthesisResponse,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const STORY: &str = "Once upon a time, a crab learned to sing.";
const VOICE: &str = "en-US-natalie";

#[tokio::test]
async fn it_should_return_audio_urls_as_json() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, Some(json!({ "audio_urls": [AUDIO_URL] })));
    assert_eq!(
        ctx.provider.submitted(),
        Some((STORY.to_string(), VOICE.to_string()))
    );
    assert_eq!(ctx.provider.count("export"), 1);
    assert_eq!(ctx.provider.count("export_status"), 1);
}

#[tokio::test]
async fn it_should_wait_through_pending_exports() {
    let ctx = TestContext::new(MockSpeechRepository::with_statuses(vec![
        Ok(ExportStatusReport::pending()),
        Ok(ExportStatusReport::pending()),
        Ok(ExportStatusReport::pending()),
        Ok(ExportStatusReport::completed(AUDIO_URL)),
    ]));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(ctx.provider.count("export_status"), 4);
}

#[tokio::test]
async fn it_should_reject_missing_story_without_calling_provider() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    let response = ctx
        .client
        .post_form("/narrate/", &[("voice", VOICE)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Story text and voice selection are required.");
    assert_eq!(ctx.provider.count("synthesize"), 0);
}

#[tokio::test]
async fn it_should_reject_missing_voice_without_calling_provider() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Story text and voice selection are required.");
    assert_eq!(ctx.provider.count("synthesize"), 0);
}

#[tokio::test]
async fn it_should_reject_empty_fields() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    for fields in [
        vec![("story", ""), ("voice", VOICE)],
        vec![("story", STORY), ("voice", "")],
        vec![("story", "   "), ("voice", VOICE)],
    ] {
        let response = ctx.client.post_form("/narrate/", &fields).await.unwrap();
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    assert_eq!(ctx.provider.count("synthesize"), 0);
}

#[tokio::test]
async fn it_should_reject_bodies_that_are_not_forms() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    let response = ctx
        .client
        .post_json("/narrate/", &json!({ "story": STORY, "voice": VOICE }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Story text and voice selection are required.");
    assert_eq!(ctx.provider.count("synthesize"), 0);
}

#[tokio::test]
async fn it_should_reject_non_post_methods() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    for method in [
        Method::GET,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ] {
        let response = ctx.client.send(method.clone(), "/narrate/").await.unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error("Invalid request method. Only POST is allowed.");
    }

    assert_eq!(ctx.provider.count("synthesize"), 0);
}

#[tokio::test]
async fn it_should_reject_cors_preflight_like_any_other_method() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    let response = ctx
        .client
        .send_with_headers(
            Method::OPTIONS,
            "/narrate/",
            &[
                ("origin", "https://elsewhere.example.com"),
                ("access-control-request-method", "POST"),
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Invalid request method. Only POST is allowed.");
    assert!(response.header("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn it_should_reject_oversized_story() {
    let ctx = TestContext::new(MockSpeechRepository::completing());
    let story = "a".repeat(3 * 1024 * 1024);

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", story.as_str()), ("voice", VOICE)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Story text is too long.");
    assert_eq!(ctx.provider.count("synthesize"), 0);
}

#[tokio::test]
async fn it_should_report_synthesis_failure_with_details() {
    let ctx = TestContext::new(MockSpeechRepository::completing().with_synthesis(Ok(
        SynthesisResponse {
            project_id: None,
            audio_file: None,
            error_message: Some("Invalid voice id".to_string()),
        },
    )));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", "nobody")])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error("Failed to create Murf project.");
    assert_eq!(response.details(), Some("Invalid voice id"));
    assert_eq!(ctx.provider.count("export"), 0);
    assert_eq!(ctx.provider.count("export_status"), 0);
}

#[tokio::test]
async fn it_should_report_export_failure() {
    let ctx = TestContext::new(MockSpeechRepository::completing().with_export(ExportResponse {
        export_id: None,
        error_message: Some("Project is empty".to_string()),
    }));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error("Failed to export Murf project.");
    assert_eq!(response.details(), Some("Project is empty"));
    assert_eq!(ctx.provider.count("export_status"), 0);
}

#[tokio::test]
async fn it_should_report_provider_export_failure() {
    let ctx = TestContext::new(MockSpeechRepository::with_statuses(vec![
        Ok(ExportStatusReport::pending()),
        Ok(ExportStatusReport::failed("Rendering crashed")),
    ]));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error("Murf audio export failed.");
    assert_eq!(response.details(), Some("Rendering crashed"));
    assert_eq!(ctx.provider.count("export_status"), 2);
}

#[tokio::test]
async fn it_should_time_out_after_attempt_budget() {
    let ctx = TestContext::new(MockSpeechRepository::with_statuses(Vec::new()));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error("Murf audio export timed out or failed to complete.");
    assert_eq!(response.details(), None);
    assert_eq!(
        ctx.provider.count("export_status"),
        TEST_POLL_ATTEMPTS as usize
    );
}

#[tokio::test]
async fn it_should_time_out_when_export_completes_without_url() {
    let ctx = TestContext::new(MockSpeechRepository::with_statuses(vec![Ok(
        ExportStatusReport {
            status: JobStatus::Completed,
            export_url: None,
            error_message: None,
        },
    )]));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error("Murf audio export timed out or failed to complete.");
    assert_eq!(response.details(), None);
    assert_eq!(ctx.provider.count("export_status"), 1);
}

#[tokio::test]
async fn it_should_report_unexpected_provider_errors() {
    let ctx = TestContext::new(MockSpeechRepository::completing().with_synthesis(Err(
        ProviderError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        },
    )));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error = response
        .body
        .as_ref()
        .and_then(|b| b.get("error"))
        .and_then(|e| e.as_str())
        .unwrap();
    assert!(error.starts_with("An unexpected error occurred:"));
    assert!(error.contains("invalid api key"));
}

#[tokio::test]
async fn it_should_return_inline_audio_without_export() {
    let ctx = TestContext::new(MockSpeechRepository::completing().with_synthesis(Ok(
        SynthesisResponse {
            audio_file: Some(AUDIO_URL.to_string()),
            ..Default::default()
        },
    )));

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, Some(json!({ "audio_urls": [AUDIO_URL] })));
    assert_eq!(ctx.provider.count("export"), 0);
}

#[tokio::test]
async fn it_should_render_page_in_page_mode() {
    let ctx = TestContext::with_mode(MockSpeechRepository::completing(), ResponseMode::Page);

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response
        .header("content-type")
        .is_some_and(|ct| ct.starts_with("text/html")));

    let html = response.text();
    assert!(html.contains(&format!(r#"<audio controls src="{}">"#, AUDIO_URL)));
    assert!(html.contains(STORY));
}

#[tokio::test]
async fn it_should_keep_errors_as_json_in_page_mode() {
    let ctx = TestContext::with_mode(MockSpeechRepository::completing(), ResponseMode::Page);

    let response = ctx
        .client
        .post_form("/narrate/", &[("voice", VOICE)])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error("Story text and voice selection are required.");
}

#[tokio::test]
async fn it_should_include_request_id_in_narration_responses() {
    let ctx = TestContext::new(MockSpeechRepository::completing());

    let response = ctx
        .client
        .post_form("/narrate/", &[("story", STORY), ("voice", VOICE)])
        .await
        .unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/narrate/").await.unwrap();
    response.assert_header_exists("x-request-id");
}

use narrator::controllers::narration::NarrationController;
use narrator::domain::narration::NarrationService;
use narrator::infrastructure::config::{Config, LogFormat};
use narrator::infrastructure::http::start_http_server;
use narrator::infrastructure::repositories::{MurfSpeechRepository, SpeechRepository};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration; refuses to start without a provider key
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting Narrator on {}:{}",
        config.host,
        config.port
    );

    let poll_policy = config.poll_policy();
    tracing::info!(
        provider_mode = %config.provider_mode,
        base_url = %config.murf_base_url,
        poll_interval_secs = poll_policy.interval.as_secs(),
        poll_max_attempts = poll_policy.max_attempts,
        worst_case_wait_secs = poll_policy.worst_case_wait().as_secs(),
        response_mode = ?config.response_mode,
        "Murf configuration loaded"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the provider repository
    let speech_repo: Arc<dyn SpeechRepository> =
        Arc::new(MurfSpeechRepository::new(config.murf_settings())?);

    // 2. Instantiate services
    let narration_service = Arc::new(NarrationService::new(speech_repo, poll_policy));

    // 3. Instantiate controllers
    let narration_controller = Arc::new(NarrationController::new(
        narration_service,
        config.response_mode,
        config.voices.clone(),
    ));

    // Start HTTP server with all routes
    start_http_server(config, narration_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "narrator=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "narrator=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

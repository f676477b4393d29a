pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, narration::NarrationController};
use crate::infrastructure::config::Config;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router
pub fn build_router(narration_controller: Arc<NarrationController>) -> Router {
    let narration_routes = Router::new()
        .route("/", get(NarrationController::index))
        .route(
            "/narrate/",
            post(NarrationController::narrate)
                .fallback(NarrationController::method_not_allowed),
        )
        .with_state(narration_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(narration_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    narration_controller: Arc<NarrationController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(narration_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

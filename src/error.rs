use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub use crate::domain::shared::error_dto::ErrorResponse;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    ExternalService {
        kind: &'static str,
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ExternalService { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the `{ error, details }` response body
    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            Self::ExternalService { details, .. } => details.clone(),
            Self::BadRequest(_) => None,
        };

        ErrorResponse {
            error: self.to_string(),
            details,
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::BadRequest(_) => tracing::warn!(
                error = %self,
                status = %status.as_u16(),
                "Request rejected"
            ),
            Self::ExternalService { kind, details, .. } => tracing::error!(
                error = %self,
                kind = *kind,
                details = ?details,
                status = %status.as_u16(),
                "Request failed"
            ),
        }

        (status, Json(self.to_response())).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

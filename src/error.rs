use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures raised while building or rendering a chart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Chart has no panels")]
    EmptyPanelSet,

    #[error("Page path '{0}' has no resource segment")]
    MissingResourcePath(String),

    #[error("Data fetch failed: {0}")]
    BackendFetch(String),

    #[error("Response does not match expected shape: {0}")]
    SchemaMismatch(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Chart(ChartError::MissingResourcePath(path)) => (
                StatusCode::BAD_REQUEST,
                format!("No resource in page path '{path}'"),
            ),
            Self::Chart(e @ (ChartError::BackendFetch(_) | ChartError::SchemaMismatch(_))) => {
                tracing::error!("Chart backend error: {e}");
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            Self::Chart(e) => {
                tracing::error!("Chart error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Chart configuration error".to_string(),
                )
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("No auth token provided")]
    Unauthorized,

    #[error("Video URL is required")]
    MissingUrl,

    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("{0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidUpstreamBody(String),

    #[error("Failed to download: {reason}")]
    DownloadFailed { status: StatusCode, reason: String },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Unauthorized => StatusCode::UNAUTHORIZED,
            ProxyError::MissingUrl => StatusCode::BAD_REQUEST,
            ProxyError::InvalidBody { status, .. } | ProxyError::DownloadFailed { status, .. } => {
                *status
            }
            ProxyError::InvalidUrl(_)
            | ProxyError::Transport(_)
            | ProxyError::InvalidUpstreamBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Body rejections keep axum's status (400/415/422) but use the relay's error shape
impl From<JsonRejection> for ProxyError {
    fn from(rejection: JsonRejection) -> Self {
        ProxyError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

// Every local failure is reported to the browser as `{"error": "..."}`
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Configuration loading errors, surfaced at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

pub type ProxyResult<T> = Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let response = ProxyError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"error": "No auth token provided"})
        );
    }

    #[tokio::test]
    async fn test_download_failed_keeps_upstream_status() {
        let err = ProxyError::DownloadFailed {
            status: StatusCode::FORBIDDEN,
            reason: "Forbidden".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Failed to download: Forbidden"})
        );
    }

    #[tokio::test]
    async fn test_invalid_body_keeps_rejection_status() {
        let err = ProxyError::InvalidBody {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_json(response).await["error"]
            .as_str()
            .unwrap()
            .contains("Content-Type"));
    }

    #[test]
    fn test_local_failures_are_internal() {
        assert_eq!(
            ProxyError::InvalidUrl("relative URL without a base".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ProxyError::InvalidUpstreamBody("expected value".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ProxyError::MissingUrl.status(), StatusCode::BAD_REQUEST);
    }
}

use crate::models::responses::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Missing query parameter 'q'")]
    MissingQuery,
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Unknown format '{0}'")]
    UnknownFormat(String),
    #[error("Book {0} not found")]
    BookNotFound(u32),
    #[error("Book {id} is not available as {format}")]
    FormatUnavailable { id: u32, format: String },
    #[error("File not found at {0}")]
    MirrorNotFound(String),
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("Upstream {url} responded with {status}")]
    UpstreamStatus { url: String, status: u16 },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MissingQuery
            | ProxyError::InvalidPath(_)
            | ProxyError::UnknownFormat(_) => StatusCode::BAD_REQUEST,
            ProxyError::BookNotFound(_)
            | ProxyError::FormatUnavailable { .. }
            | ProxyError::MirrorNotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::Upstream(_) | ProxyError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(ProxyError::MissingQuery.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProxyError::UnknownFormat("docx".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::InvalidPath("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_resources_map_to_404() {
        assert_eq!(ProxyError::BookNotFound(1).status_code(), StatusCode::NOT_FOUND);
        let err = ProxyError::FormatUnavailable {
            id: 11,
            format: "pdf".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Book 11 is not available as pdf");
    }

    #[test]
    fn upstream_failures_map_to_502() {
        let err = ProxyError::UpstreamStatus {
            url: "https://gutendex.com/books".to_string(),
            status: 503,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ProxyError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn renders_json_error_body() {
        let response = ProxyError::BookNotFound(42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Book 42 not found");
    }
}

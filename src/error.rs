use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum ShelfError {
    /// A required field is missing or empty, or the request could not be parsed.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("{0}")]
    Database(#[from] SqlxError),
}

impl ShelfError {
    pub fn validation(message: impl Into<String>) -> Self {
        ShelfError::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ShelfError::Validation(_) => StatusCode::BAD_REQUEST,
            ShelfError::NotFound(_) => StatusCode::NOT_FOUND,
            ShelfError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ShelfError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShelfError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if let ShelfError::Database(e) = &self {
            error!(error = %e, "store operation failed");
        }
        let body = ApiErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Error payload shared by every failing route: `{"error": "<message>"}`.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_renders_error_object() {
        let resp = ShelfError::NotFound("Collection not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"error":"Collection not found"}"#);
    }

    #[test]
    fn store_failures_map_to_500_with_message() {
        let err = ShelfError::from(SqlxError::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), SqlxError::RowNotFound.to_string());
    }

    #[test]
    fn validation_is_bad_request() {
        assert_eq!(
            ShelfError::validation("Title is required").status(),
            StatusCode::BAD_REQUEST
        );
    }
}

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ShelfError;
use crate::types::payload::Payload;

/// JSON body extractor for the write routes.
///
/// An empty body or a bare `null` is rejected with the payload's own "missing" message; anything
/// that does not deserialize into `T` is a 400 rather than axum's default 415/422. The
/// `Content-Type` header is not inspected.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Payload,
{
    type Rejection = ShelfError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ShelfError::PayloadTooLarge
            } else {
                ShelfError::validation(rejection.body_text())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ShelfError::validation(T::MISSING));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ShelfError::validation(format!("Invalid JSON body: {e}")))?;
        if value.is_null() {
            return Err(ShelfError::validation(T::MISSING));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| ShelfError::validation(format!("Invalid request body: {e}")))
    }
}

use axum::Json;
use serde::Serialize;

pub const LIVENESS_TEXT: &str = "Backend for Comic Collection App is running!";

/// GET / -> plain-text liveness string.
pub async fn index() -> &'static str {
    LIVENESS_TEXT
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health -> service name and version.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

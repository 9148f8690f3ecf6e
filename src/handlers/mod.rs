pub mod collections;
pub mod issues;
pub mod status;

use serde::Serialize;

/// `{"message": "..."}` returned by the delete routes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Returned by an update whose body named no updatable field: the row is echoed unchanged.
#[derive(Debug, Serialize)]
pub struct UnchangedResponse<T> {
    pub message: &'static str,
    pub data: T,
}

pub const NO_FIELDS_MESSAGE: &str = "No fields to update provided";

//! Request extractors shared by the handlers.

pub mod entity_id;
pub mod json_body;

pub use entity_id::{Entity, EntityId};
pub use json_body::JsonBody;

//! Request bodies accepted by the collection and issue routes.
//!
//! Update bodies distinguish a field that is absent (left untouched) from one that is present,
//! including an explicit `null` for nullable columns. Absent is `None`; present is `Some(_)`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ShelfError;

/// A JSON body type, together with the message returned when the request has no body at all.
pub trait Payload {
    const MISSING: &'static str;
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCollectionRequest {
    pub title: Option<String>,
    pub volume: Option<String>,
    pub publication_years: Option<String>,
    pub cover_image_url: Option<String>,
}

impl Payload for CreateCollectionRequest {
    const MISSING: &'static str = "Title is required";
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateIssueRequest {
    pub issue_number: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub is_owned: bool,
    pub title: Option<String>,
    pub cover_image_url: Option<String>,
    pub release_date: Option<String>,
}

impl Payload for CreateIssueRequest {
    const MISSING: &'static str = "Issue number is required";
}

#[derive(Debug, Default, Deserialize)]
pub struct CollectionPatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub volume: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub publication_years: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cover_image_url: Option<Option<String>>,
}

impl Payload for CollectionPatch {
    const MISSING: &'static str = "No data provided for update";
}

impl CollectionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.volume.is_none()
            && self.publication_years.is_none()
            && self.cover_image_url.is_none()
    }

    /// `title` may be changed but never cleared.
    pub fn validate(&self) -> Result<(), ShelfError> {
        match &self.title {
            Some(None) => Err(ShelfError::validation("Title cannot be empty")),
            Some(Some(t)) if t.is_empty() => Err(ShelfError::validation("Title cannot be empty")),
            _ => Ok(()),
        }
    }
}

/// Partial issue update. `collection_id` is not a field here, so a supplied value is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct IssuePatch {
    #[serde(default, deserialize_with = "present")]
    pub issue_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_truthy")]
    pub is_owned: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cover_image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub release_date: Option<Option<String>>,
}

impl Payload for IssuePatch {
    const MISSING: &'static str = "No data provided for update";
}

impl IssuePatch {
    pub fn is_empty(&self) -> bool {
        self.issue_number.is_none()
            && self.is_owned.is_none()
            && self.title.is_none()
            && self.cover_image_url.is_none()
            && self.release_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ShelfError> {
        match &self.issue_number {
            Some(None) => Err(ShelfError::validation("Issue number cannot be empty")),
            Some(Some(n)) if n.is_empty() => {
                Err(ShelfError::validation("Issue number cannot be empty"))
            }
            _ => Ok(()),
        }
    }
}

/// JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| is_truthy(&v))
}

fn present_truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    truthy(deserializer).map(Some)
}

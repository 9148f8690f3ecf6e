use crate::error::ShelfError;
use crate::middleware::Entity;
use crate::types::payload::{CreateCollectionRequest, CreateIssueRequest};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct Collection {
    pub id: i64,
    pub title: String,
    pub volume: Option<String>,
    pub publication_years: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Issue {
    pub id: i64,
    pub collection_id: i64,
    pub issue_number: String,
    pub is_owned: bool,
    pub title: Option<String>,
    pub cover_image_url: Option<String>,
    pub release_date: Option<String>,
}

impl Entity for Collection {
    const NOT_FOUND: &'static str = "Collection not found";
}

impl Entity for Issue {
    const NOT_FOUND: &'static str = "Issue not found";
}

/// A collection together with its issues, ordered by `issue_number` as text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub collection: Collection,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionStats {
    pub collection_id: i64,
    pub total: i64,
    pub owned: i64,
    pub missing: i64,
    /// Owned share rounded to a whole percent; 0 for an empty collection.
    pub percentage: i64,
}

impl CollectionStats {
    pub fn from_counts(collection_id: i64, total: i64, owned: i64) -> Self {
        let percentage = if total > 0 {
            (owned as f64 / total as f64 * 100.0).round() as i64
        } else {
            0
        };
        Self {
            collection_id,
            total,
            owned,
            missing: total - owned,
            percentage,
        }
    }
}

/// Insert form of a collection. Only built through `TryFrom`, so `title` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollection {
    pub title: String,
    pub volume: Option<String>,
    pub publication_years: Option<String>,
    pub cover_image_url: Option<String>,
}

impl TryFrom<CreateCollectionRequest> for NewCollection {
    type Error = ShelfError;

    fn try_from(req: CreateCollectionRequest) -> Result<Self, Self::Error> {
        let title = req
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ShelfError::validation("Title is required"))?;
        Ok(Self {
            title,
            volume: req.volume,
            publication_years: req.publication_years,
            cover_image_url: req.cover_image_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    pub issue_number: String,
    pub is_owned: bool,
    pub title: Option<String>,
    pub cover_image_url: Option<String>,
    pub release_date: Option<String>,
}

impl TryFrom<CreateIssueRequest> for NewIssue {
    type Error = ShelfError;

    fn try_from(req: CreateIssueRequest) -> Result<Self, Self::Error> {
        let issue_number = req
            .issue_number
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ShelfError::validation("Issue number is required"))?;
        Ok(Self {
            issue_number,
            is_owned: req.is_owned,
            title: req.title,
            cover_image_url: req.cover_image_url,
            release_date: req.release_date,
        })
    }
}

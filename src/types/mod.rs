pub mod payload;

pub use payload::{CollectionPatch, CreateCollectionRequest, CreateIssueRequest, IssuePatch};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use super::{MessageResponse, NO_FIELDS_MESSAGE, UnchangedResponse};
use crate::db::{Collection, CollectionDetail, CollectionStats, NewCollection};
use crate::error::ShelfError;
use crate::middleware::{Entity, EntityId, JsonBody};
use crate::router::ShelfState;
use crate::types::{CollectionPatch, CreateCollectionRequest};

/// POST /collections -> 201 with the stored row.
pub async fn create_collection(
    State(state): State<ShelfState>,
    JsonBody(body): JsonBody<CreateCollectionRequest>,
) -> Result<(StatusCode, Json<Collection>), ShelfError> {
    let new = NewCollection::try_from(body)?;

    let mut session = state.store.session().await?;
    let created = session.insert_collection(new).await?;
    session.finish().await;

    info!(collection_id = created.id, title = %created.title, "collection created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /collections -> every collection, ordered by title.
pub async fn list_collections(
    State(state): State<ShelfState>,
) -> Result<Json<Vec<Collection>>, ShelfError> {
    let mut session = state.store.session().await?;
    let rows = session.list_collections().await?;
    session.finish().await;
    Ok(Json(rows))
}

/// GET /collections/{id} -> the collection with its issues embedded.
pub async fn get_collection(
    State(state): State<ShelfState>,
    EntityId(id, _): EntityId<Collection>,
) -> Result<Json<CollectionDetail>, ShelfError> {
    let mut session = state.store.session().await?;
    let collection = session
        .find_collection(id)
        .await?
        .ok_or(ShelfError::NotFound(Collection::NOT_FOUND))?;
    let issues = session.list_issues_for(id).await?;
    session.finish().await;

    Ok(Json(CollectionDetail { collection, issues }))
}

/// PUT /collections/{id} -> partial update; only fields present in the body change.
pub async fn update_collection(
    State(state): State<ShelfState>,
    EntityId(id, _): EntityId<Collection>,
    JsonBody(patch): JsonBody<CollectionPatch>,
) -> Result<Response, ShelfError> {
    patch.validate()?;

    let mut session = state.store.session().await?;
    let row = session
        .update_collection(id, &patch)
        .await?
        .ok_or(ShelfError::NotFound(Collection::NOT_FOUND))?;
    session.finish().await;

    if patch.is_empty() {
        return Ok(Json(UnchangedResponse {
            message: NO_FIELDS_MESSAGE,
            data: row,
        })
        .into_response());
    }
    info!(collection_id = id, "collection updated");
    Ok(Json(row).into_response())
}

/// DELETE /collections/{id} -> removes the collection and, by cascade, its issues.
pub async fn delete_collection(
    State(state): State<ShelfState>,
    EntityId(id, _): EntityId<Collection>,
) -> Result<Json<MessageResponse>, ShelfError> {
    let mut session = state.store.session().await?;
    if !session.delete_collection(id).await? {
        return Err(ShelfError::NotFound(Collection::NOT_FOUND));
    }
    session.finish().await;

    info!(collection_id = id, "collection deleted");
    Ok(Json(MessageResponse {
        message: "Collection deleted successfully",
    }))
}

/// GET /collections/{id}/stats -> owned/missing counts for one collection.
pub async fn collection_stats(
    State(state): State<ShelfState>,
    EntityId(id, _): EntityId<Collection>,
) -> Result<Json<CollectionStats>, ShelfError> {
    let mut session = state.store.session().await?;
    if session.find_collection(id).await?.is_none() {
        return Err(ShelfError::NotFound(Collection::NOT_FOUND));
    }
    let stats = session.collection_stats(id).await?;
    session.finish().await;
    Ok(Json(stats))
}

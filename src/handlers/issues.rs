use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use super::{MessageResponse, NO_FIELDS_MESSAGE, UnchangedResponse};
use crate::db::{Collection, Issue, NewIssue};
use crate::error::ShelfError;
use crate::middleware::{Entity, EntityId, JsonBody};
use crate::router::ShelfState;
use crate::types::{CreateIssueRequest, IssuePatch};

/// POST /collections/{id}/issues -> 201 with the stored issue.
pub async fn create_issue(
    State(state): State<ShelfState>,
    EntityId(collection_id, _): EntityId<Collection>,
    JsonBody(body): JsonBody<CreateIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), ShelfError> {
    let new = NewIssue::try_from(body)?;

    let mut session = state.store.session().await?;
    if session.find_collection(collection_id).await?.is_none() {
        return Err(ShelfError::NotFound(Collection::NOT_FOUND));
    }
    let created = session.insert_issue(collection_id, new).await?;
    session.finish().await;

    info!(
        collection_id,
        issue_id = created.id,
        issue_number = %created.issue_number,
        "issue created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /issues/{id}
pub async fn get_issue(
    State(state): State<ShelfState>,
    EntityId(id, _): EntityId<Issue>,
) -> Result<Json<Issue>, ShelfError> {
    let mut session = state.store.session().await?;
    let issue = session
        .find_issue(id)
        .await?
        .ok_or(ShelfError::NotFound(Issue::NOT_FOUND))?;
    session.finish().await;
    Ok(Json(issue))
}

/// PUT /issues/{id} -> partial update. A `collection_id` in the body is ignored.
pub async fn update_issue(
    State(state): State<ShelfState>,
    EntityId(id, _): EntityId<Issue>,
    JsonBody(patch): JsonBody<IssuePatch>,
) -> Result<Response, ShelfError> {
    patch.validate()?;

    let mut session = state.store.session().await?;
    let row = session
        .update_issue(id, &patch)
        .await?
        .ok_or(ShelfError::NotFound(Issue::NOT_FOUND))?;
    session.finish().await;

    if patch.is_empty() {
        return Ok(Json(UnchangedResponse {
            message: NO_FIELDS_MESSAGE,
            data: row,
        })
        .into_response());
    }
    info!(issue_id = id, is_owned = row.is_owned, "issue updated");
    Ok(Json(row).into_response())
}

/// DELETE /issues/{id}
pub async fn delete_issue(
    State(state): State<ShelfState>,
    EntityId(id, _): EntityId<Issue>,
) -> Result<Json<MessageResponse>, ShelfError> {
    let mut session = state.store.session().await?;
    if !session.delete_issue(id).await? {
        return Err(ShelfError::NotFound(Issue::NOT_FOUND));
    }
    session.finish().await;

    info!(issue_id = id, "issue deleted");
    Ok(Json(MessageResponse {
        message: "Issue deleted successfully",
    }))
}

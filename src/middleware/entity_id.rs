use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use std::marker::PhantomData;

use crate::error::ShelfError;

/// A record addressable by an integer id in the route.
pub trait Entity {
    const NOT_FOUND: &'static str;
}

/// The integer `{id}` segment of a route addressing `E`.
///
/// A segment that is not an integer cannot name a row, so it is answered like an unknown id:
/// 404 with `E::NOT_FOUND`.
#[derive(Debug)]
pub struct EntityId<E>(pub i64, pub PhantomData<E>);

impl<S, E> FromRequestParts<S> for EntityId<E>
where
    S: Send + Sync,
    E: Entity,
{
    type Rejection = ShelfError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ShelfError::NotFound(E::NOT_FOUND))?;
        Ok(EntityId(id, PhantomData))
    }
}

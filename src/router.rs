use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::config::Config;
use crate::db::Store;
use crate::handlers::{collections, issues, status};

/// Shared, immutable per-process state. Rows are never cached here.
#[derive(Clone)]
pub struct ShelfState {
    pub store: Store,
}

impl ShelfState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

pub fn shelf_router(state: ShelfState, cfg: &Config) -> Router {
    Router::new()
        .route("/", get(status::index))
        .route("/health", get(status::health))
        .route(
            "/collections",
            get(collections::list_collections).post(collections::create_collection),
        )
        .route(
            "/collections/{id}",
            get(collections::get_collection)
                .put(collections::update_collection)
                .delete(collections::delete_collection),
        )
        .route("/collections/{id}/stats", get(collections::collection_stats))
        .route("/collections/{id}/issues", post(issues::create_issue))
        .route(
            "/issues/{id}",
            get(issues::get_issue)
                .put(issues::update_issue)
                .delete(issues::delete_issue),
        )
        .layer(DefaultBodyLimit::max(cfg.body_limit))
        .with_state(state)
}

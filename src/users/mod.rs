use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod repo;
pub mod repo_types;
pub mod store;

/// `/users` (collection) and `/users/:id` (single item).
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::collection_routes())
        .merge(handlers::item_routes())
}

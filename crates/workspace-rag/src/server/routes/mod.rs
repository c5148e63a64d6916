//! API routes

pub mod index;
pub mod search;

use axum::{
    routing::{delete, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/index", post(index::index_document))
        .route("/index/:id", delete(index::delete_document))
        .route("/search", post(search::search))
}

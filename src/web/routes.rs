//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{index_handler, stats_page_handler};
use axum::{Router, routing::get};

/// Public HTML pages.
///
/// # Endpoints
///
/// - `GET /`      - Create, update and delete short links
/// - `GET /stats` - Look up a short link and its access count
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/stats", get(stats_page_handler))
}

//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, link_stats_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short link CRUD routes.
///
/// # Endpoints
///
/// - `POST   /shorten`               - Create a short link
/// - `GET    /shorten/{code}`        - Read a short link
/// - `PUT    /shorten/{code}`        - Change its destination
/// - `DELETE /shorten/{code}`        - Delete it
/// - `GET    /shorten/{code}/stats`  - Read it, including the access count
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(create_link_handler))
        .route(
            "/shorten/{code}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/shorten/{code}/stats", get(link_stats_handler))
}

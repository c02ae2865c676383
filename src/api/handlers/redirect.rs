//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination and counts the access.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `302 Found`. The counter is incremented in the same store
/// operation that reads the destination, so concurrent hits are all counted.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.link_service.resolve_redirect(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]))
}

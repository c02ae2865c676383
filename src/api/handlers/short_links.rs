//! Handlers for the short link CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::short_link::{ShortLinkRequest, ShortLinkResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created` with the full record.
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing or does not start with
/// `http://` or `https://`.
pub async fn create_link_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ShortLinkRequest>,
) -> Result<(StatusCode, Json<ShortLinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create(payload.url).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Returns the record for a short code.
///
/// # Endpoint
///
/// `GET /shorten/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let link = state.link_service.get(&code).await?;
    Ok(Json(link.into()))
}

/// Changes the destination of a short code.
///
/// # Endpoint
///
/// `PUT /shorten/{code}`
///
/// `short_code`, `access_count` and `created_at` are preserved;
/// `updated_at` is refreshed.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 404 Not Found if the code is unknown.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ShortLinkRequest>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    payload.validate()?;

    let link = state.link_service.update(&code, payload.url).await?;
    Ok(Json(link.into()))
}

/// Deletes a short code.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the record for a short code, including its access count.
///
/// # Endpoint
///
/// `GET /shorten/{code}/stats`
///
/// Every projection already carries `access_count`, so this returns the same
/// body as `GET /shorten/{code}`.
pub async fn link_stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let link = state.link_service.stats(&code).await?;
    Ok(Json(link.into()))
}

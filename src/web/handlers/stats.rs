//! Statistics lookup page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;

/// Optional code to look up as soon as the page loads.
#[derive(Debug, Deserialize)]
pub struct StatsPageQuery {
    pub code: Option<String>,
}

/// Template for the statistics page.
///
/// Renders `templates/stats.html`, which fetches
/// `/shorten/{code}/stats` from the browser.
#[derive(Template, WebTemplate)]
#[template(path = "stats.html")]
pub struct StatsTemplate {
    pub code: String,
}

/// # Endpoint
///
/// `GET /stats?code={code}`
pub async fn stats_page_handler(Query(query): Query<StatsPageQuery>) -> impl IntoResponse {
    StatsTemplate {
        code: query.code.unwrap_or_default(),
    }
}

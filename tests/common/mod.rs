#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use shorturl::application::services::LinkService;
use shorturl::domain::repositories::ShortLinkRepository;
use shorturl::infrastructure::persistence::PgShortLinkRepository;
use shorturl::state::{AppState, SharedLinkService};
use shorturl::utils::code_generator::CodeGenerator;

pub fn create_test_service(pool: PgPool) -> Arc<SharedLinkService> {
    let repository: Arc<dyn ShortLinkRepository> =
        Arc::new(PgShortLinkRepository::new(Arc::new(pool)));

    Arc::new(LinkService::new(repository))
}

pub fn create_test_service_with(
    repository: Arc<dyn ShortLinkRepository>,
    code_length: usize,
    max_attempts: u32,
) -> Arc<SharedLinkService> {
    Arc::new(LinkService::with_settings(
        repository,
        CodeGenerator::new(code_length),
        max_attempts,
    ))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(create_test_service(pool))
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO short_urls (url, short_code) VALUES ($1, $2) RETURNING id")
        .bind(url)
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn access_count(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT access_count FROM short_urls WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn link_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

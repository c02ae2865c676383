//! Correctness of code allocation and counting under concurrent requests,
//! checked against the real store.

mod common;

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use shorturl::AppError;
use shorturl::domain::entities::{NewShortLink, ShortLink};
use shorturl::domain::repositories::ShortLinkRepository;
use shorturl::infrastructure::persistence::PgShortLinkRepository;

/// Store that always claims a code is free, so every collision has to be
/// caught by the uniqueness constraint on insert.
struct NoPrecheckRepository(PgShortLinkRepository);

#[async_trait]
impl ShortLinkRepository for NoPrecheckRepository {
    async fn exists(&self, _code: &str) -> Result<bool, AppError> {
        Ok(false)
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        self.0.insert(new_link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        self.0.find_by_code(code).await
    }

    async fn update_url(&self, code: &str, url: &str) -> Result<Option<ShortLink>, AppError> {
        self.0.update_url(code, url).await
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        self.0.delete(code).await
    }

    async fn increment_access_count(&self, code: &str) -> Result<Option<String>, AppError> {
        self.0.increment_access_count(code).await
    }

    async fn list_most_accessed(&self, limit: i64) -> Result<Vec<ShortLink>, AppError> {
        self.0.list_most_accessed(limit).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.0.count().await
    }

    async fn total_access_count(&self) -> Result<i64, AppError> {
        self.0.total_access_count().await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.0.ping().await
    }
}

#[sqlx::test]
async fn test_concurrent_creates_yield_distinct_codes(pool: PgPool) {
    const N: usize = 50;
    let service = common::create_test_service(pool.clone());

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(Some(format!("https://example.com/{i}")))
                    .await
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap().unwrap();
        codes.insert(link.code);
    }

    assert_eq!(codes.len(), N);
    assert_eq!(common::link_count(&pool).await, N as i64);
}

#[sqlx::test]
async fn test_insert_conflicts_are_retried(pool: PgPool) {
    const N: usize = 30;
    // One-character codes leave 62 slots, so concurrent creators collide often.
    let repository: Arc<dyn ShortLinkRepository> = Arc::new(NoPrecheckRepository(
        PgShortLinkRepository::new(Arc::new(pool.clone())),
    ));
    let service = common::create_test_service_with(repository, 1, 200);

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(Some(format!("https://example.com/{i}")))
                    .await
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap().unwrap();
        assert_eq!(link.code.len(), 1);
        codes.insert(link.code);
    }

    assert_eq!(codes.len(), N);
    assert_eq!(common::link_count(&pool).await, N as i64);
}

#[sqlx::test]
async fn test_exhausted_code_space_is_reported(pool: PgPool) {
    let repository: Arc<dyn ShortLinkRepository> = Arc::new(NoPrecheckRepository(
        PgShortLinkRepository::new(Arc::new(pool.clone())),
    ));

    for c in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
        common::create_test_link(&pool, &c.to_string(), "https://full.com").await;
    }

    let service = common::create_test_service_with(repository, 1, 5);
    let result = service.create(Some("https://example.com".to_string())).await;

    assert!(matches!(
        result,
        Err(AppError::CodeSpaceExhausted { attempts: 5 })
    ));
}

#[sqlx::test]
async fn test_concurrent_redirects_are_all_counted(pool: PgPool) {
    const M: usize = 100;
    common::create_test_link(&pool, "hot123", "https://example.com").await;
    let service = common::create_test_service(pool.clone());

    let handles: Vec<_> = (0..M)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.resolve_redirect("hot123").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "https://example.com");
    }

    assert_eq!(common::access_count(&pool, "hot123").await, M as i64);
}

#[sqlx::test]
async fn test_concurrent_redirects_on_different_codes(pool: PgPool) {
    common::create_test_link(&pool, "left12", "https://left.com").await;
    common::create_test_link(&pool, "right1", "https://right.com").await;
    let service = common::create_test_service(pool.clone());

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let service = service.clone();
            let code = if i % 2 == 0 { "left12" } else { "right1" };
            tokio::spawn(async move { service.resolve_redirect(code).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(common::access_count(&pool, "left12").await, 20);
    assert_eq!(common::access_count(&pool, "right1").await, 20);
}

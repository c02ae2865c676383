mod common;

use axum_test::TestServer;
use sqlx::PgPool;
use shorturl::routes::router;

#[sqlx::test]
async fn test_index_page_renders(pool: PgPool) {
    let server = TestServer::new(router(common::create_test_state(pool))).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<h1>URL Shortener</h1>"));
    assert!(html.contains(r#"maxlength="6""#));
}

#[sqlx::test]
async fn test_stats_page_prefills_code(pool: PgPool) {
    let server = TestServer::new(router(common::create_test_state(pool))).unwrap();

    let response = server.get("/stats").add_query_param("code", "aB3xYz").await;

    response.assert_status_ok();
    assert!(response.text().contains(r#"value="aB3xYz""#));
}

#[sqlx::test]
async fn test_stats_page_is_not_a_redirect(pool: PgPool) {
    common::create_test_link(&pool, "stats", "https://example.com").await;
    let server = TestServer::new(router(common::create_test_state(pool.clone()))).unwrap();

    server.get("/stats").await.assert_status_ok();
    assert_eq!(common::access_count(&pool, "stats").await, 0);
}

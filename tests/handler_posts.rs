mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::http::StatusCode;

fn seeded_repo() -> Arc<common::InMemoryPostRepository> {
    let repo = Arc::new(common::InMemoryPostRepository::new(&[
        (1, "Ada"),
        (2, "Grace"),
    ]));

    repo.seed(1, "Alpha", "Intro to systems programming.", Some(common::days_ago(3)));
    repo.seed(1, "Beta", "Notes on borrow checking.", Some(common::days_ago(2)));
    repo.seed(2, "Gamma", "Async runtimes compared in detail.", Some(common::days_ago(1)));
    repo
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_default_sorted_latest_first() {
    let server = common::test_server(seeded_repo());

    let response = server.get("/api/posts").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let items = json["items"].as_array().unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i["title"].as_str().unwrap()).collect();

    assert_eq!(titles, vec!["Gamma", "Beta", "Alpha"]);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["total_items"], 3);
    assert_eq!(json["pagination"]["total_pages"], 1);
}

#[tokio::test]
async fn test_list_sort_oldest_and_title() {
    let server = common::test_server(seeded_repo());

    let json = server
        .get("/api/posts")
        .add_query_param("sort", "oldest")
        .await
        .json::<serde_json::Value>();
    let titles: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

    let json = server
        .get("/api/posts")
        .add_query_param("sort", "title")
        .await
        .json::<serde_json::Value>();
    let titles: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn test_list_search_matches_title_and_body() {
    let server = common::test_server(seeded_repo());

    let json = server
        .get("/api/posts")
        .add_query_param("q", "alpha")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["pagination"]["total_items"], 1);
    assert_eq!(json["items"][0]["title"], "Alpha");

    // Body match, case-insensitive
    let json = server
        .get("/api/posts")
        .add_query_param("q", "BORROW")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["items"][0]["title"], "Beta");
}

#[tokio::test]
async fn test_list_author_filter() {
    let server = common::test_server(seeded_repo());

    let json = server
        .get("/api/posts")
        .add_query_param("author", "Grace")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["pagination"]["total_items"], 1);
    assert_eq!(json["items"][0]["author"], "Grace");
}

#[tokio::test]
async fn test_list_excludes_drafts_and_scheduled() {
    let repo = seeded_repo();
    repo.seed(1, "Draft", "Not published yet at all.", None);
    repo.seed(1, "Scheduled", "Goes live next week only.", Some(common::days_ahead(7)));

    let server = common::test_server(repo);
    let json = server.get("/api/posts").await.json::<serde_json::Value>();

    assert_eq!(json["pagination"]["total_items"], 3);
    let titles: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert!(!titles.contains(&"Draft"));
    assert!(!titles.contains(&"Scheduled"));

    // Unpublished posts stay hidden even when searched for directly.
    let json = server
        .get("/api/posts")
        .add_query_param("q", "Draft")
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["pagination"]["total_items"], 0);
}

#[tokio::test]
async fn test_list_rejects_page_zero_and_unknown_sort() {
    let server = common::test_server(seeded_repo());

    server
        .get("/api/posts")
        .add_query_param("page", "0")
        .await
        .assert_status_bad_request();

    server
        .get("/api/posts")
        .add_query_param("sort", "popular")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_list_is_served_from_cache_on_repeat() {
    let repo = seeded_repo();
    let server = common::test_server(repo.clone());

    let first = server.get("/api/posts").await;
    first.assert_status_ok();
    assert_eq!(first.header("x-cache-status"), "MISS");

    let second = server.get("/api/posts").await;
    second.assert_status_ok();
    assert_eq!(second.header("x-cache-status"), "HIT");

    // The repository produced the page exactly once.
    assert_eq!(repo.calls.list_published.load(Ordering::SeqCst), 1);
    assert_eq!(repo.calls.count_published.load(Ordering::SeqCst), 1);
}

// ─── DETAIL ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_show_published_post() {
    let repo = seeded_repo();
    let server = common::test_server(repo);

    let response = server.get("/api/posts/1").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["title"], "Alpha");
    assert_eq!(json["author"], "Ada");
}

#[tokio::test]
async fn test_show_draft_and_scheduled_are_not_found() {
    let repo = Arc::new(common::InMemoryPostRepository::new(&[(1, "Ada")]));
    let draft = repo.seed(1, "Draft", "Not published yet at all.", None);
    let scheduled = repo.seed(1, "Scheduled", "Next week, with any luck.", Some(common::days_ahead(2)));

    let server = common::test_server(repo);
    server
        .get(&format!("/api/posts/{draft}"))
        .await
        .assert_status_not_found();
    server
        .get(&format!("/api/posts/{scheduled}"))
        .await
        .assert_status_not_found();
    server.get("/api/posts/999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_show_error_shape() {
    let server = common::test_server(seeded_repo());

    let response = server.get("/api/posts/999").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert!(json["error"]["message"].is_string());
}

#[tokio::test]
async fn test_huge_post_body_is_served_intact() {
    let repo = Arc::new(common::InMemoryPostRepository::new(&[(1, "Ada")]));
    let body = "x".repeat(2 * 1024 * 1024);
    let id = repo.seed(1, "Huge", &body, Some(common::days_ago(1)));

    let server = common::test_server(repo);

    // Too big for the response-fragment cache; must pass through untouched.
    let response = server.get(&format!("/api/posts/{id}")).await;
    response.assert_status_ok();
    assert!(response.headers().get("x-cache-status").is_none());

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["body"].as_str().unwrap().len(), body.len());

    // And again: the skipped store must not leave an empty entry behind.
    let json = server
        .get(&format!("/api/posts/{id}"))
        .await
        .json::<serde_json::Value>();
    assert_eq!(json["body"].as_str().unwrap().len(), body.len());
}

// ─── POPULAR ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_popular_returns_most_recent_first() {
    let server = common::test_server(seeded_repo());

    let response = server
        .get("/api/posts/popular")
        .add_query_param("limit", "2")
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Gamma", "Beta"]);
}

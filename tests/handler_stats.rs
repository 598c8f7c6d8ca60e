mod common;

use chrono::{Duration, Utc};
use serde_json::{Map, Value};
use splitlink::domain::click_worker::run_click_worker;
use splitlink::domain::repositories::LinkRepository;
use std::time::Duration as StdDuration;

#[tokio::test]
async fn test_stats_for_new_link() {
    let store = common::create_test_store();
    common::create_test_link(&store, "fresh", "https://example.com").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server.get("/api/stats/fresh").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["code"], "fresh");
    assert_eq!(body["totalClicks"], 0);
    assert_eq!(body["clicks24h"], 0);
    assert_eq!(body["history"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn test_stats_history_window() {
    let store = common::create_test_store();
    common::create_test_link(&store, "hist", "https://example.com").await;
    let (state, _rx) = common::create_test_state(store);

    let now = Utc::now();
    state
        .stats_service
        .track_click_at("hist", Map::new(), now - Duration::days(2))
        .await
        .unwrap();
    state
        .stats_service
        .track_click_at("hist", Map::new(), now)
        .await
        .unwrap();

    let server = axum_test::TestServer::new(common::create_test_app(state)).unwrap();

    let response = server
        .get("/api/stats/hist")
        .add_query_param("days", "7")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["totalClicks"], 2);
    assert_eq!(body["clicks24h"], 1);

    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 7);
    assert_eq!(history[6]["count"], 1);
    assert_eq!(history[4]["count"], 1);
    assert_eq!(history[5]["count"], 0);
}

#[tokio::test]
async fn test_stats_invalid_days() {
    let store = common::create_test_store();
    common::create_test_link(&store, "days", "https://example.com").await;
    let (server, _rx) = common::create_test_server(store);

    let response = server
        .get("/api/stats/days")
        .add_query_param("days", "0")
        .await;
    response.assert_status_bad_request();

    let response = server
        .get("/api/stats/days")
        .add_query_param("days", "366")
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_stats_not_found() {
    let store = common::create_test_store();
    let (server, _rx) = common::create_test_server(store);

    let response = server.get("/api/stats/missing").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirects_are_counted_by_worker() {
    let store = common::create_test_store();
    common::create_test_link(&store, "counted", "https://example.com").await;
    let (state, rx) = common::create_test_state(store.clone());

    tokio::spawn(run_click_worker(rx, state.stats_service.clone(), 3));

    let server = axum_test::TestServer::new(common::create_test_app(state)).unwrap();

    for _ in 0..3 {
        let response = server
            .get("/redirect")
            .add_query_param("code", "counted")
            .add_header("User-Agent", "TestBot/1.0")
            .await;
        assert_eq!(response.status_code(), 307);
    }

    let mut total = 0;
    for _ in 0..200 {
        let link = store.find_by_code("counted").await.unwrap().unwrap();
        total = link.stats.total_clicks;
        if total == 3 {
            break;
        }
        tokio::time::sleep(StdDuration::from_millis(10)).await;
    }
    assert_eq!(total, 3);

    let link = store.find_by_code("counted").await.unwrap().unwrap();
    assert_eq!(link.stats.clicks_24h, 3);
    assert_eq!(link.stats.click_timestamps.len(), 3);
    assert_eq!(
        link.stats.click_timestamps[0].metadata["userAgent"],
        "TestBot/1.0"
    );

    let response = server.get("/api/stats/counted").await;
    let body: Value = response.json();
    assert_eq!(body["totalClicks"], 3);
}

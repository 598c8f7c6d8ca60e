#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use chrono::Utc;
use splitlink::api::handlers::{health_handler, redirect_handler};
use splitlink::api::routes::api_routes;
use splitlink::domain::click_event::ClickEvent;
use splitlink::domain::entities::{Link, Settings, UtmParams, Variant};
use splitlink::domain::repositories::LinkRepository;
use splitlink::infrastructure::persistence::JsonStore;
use splitlink::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_DOMAIN: &str = "s.example.com";

pub fn create_test_store() -> Arc<JsonStore> {
    Arc::new(JsonStore::in_memory(Settings::new(TEST_DOMAIN)))
}

pub fn create_test_state(store: Arc<JsonStore>) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let state = AppState::new(store, tx, "https", Settings::new(TEST_DOMAIN));
    (state, rx)
}

/// Same routes as the server, without the tracing and path layers.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/redirect", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}

pub fn create_test_server(store: Arc<JsonStore>) -> (TestServer, mpsc::Receiver<ClickEvent>) {
    let (state, rx) = create_test_state(store);
    let server = TestServer::new(create_test_app(state)).unwrap();
    (server, rx)
}

pub async fn create_test_link(store: &JsonStore, code: &str, url: &str) -> Link {
    let link = Link::new(
        uuid::Uuid::new_v4().to_string(),
        code.to_string(),
        url.to_string(),
        Utc::now(),
    );
    store.save(link).await.unwrap()
}

pub async fn create_inactive_link(store: &JsonStore, code: &str, url: &str) -> Link {
    let mut link = create_test_link(store, code, url).await;
    link.is_active = false;
    store.save(link).await.unwrap()
}

pub async fn create_utm_link(store: &JsonStore, code: &str, url: &str, source: &str) -> Link {
    let mut link = create_test_link(store, code, url).await;
    link.utm_params = Some(UtmParams {
        utm_source: Some(source.to_string()),
        ..Default::default()
    });
    store.save(link).await.unwrap()
}

pub async fn create_ab_link(store: &JsonStore, code: &str, variants: Vec<Variant>) -> Link {
    let mut link = create_test_link(store, code, "https://example.com/original").await;
    link.ab_tests = Some(variants);
    store.save(link).await.unwrap()
}

use chrono::Utc;
use serde_json::{Map, json};
use splitlink::application::services::StatsService;
use splitlink::domain::entities::{CLIENT_TIMESTAMP_KEY, Link, Settings, Snapshot};
use splitlink::domain::repositories::{LinkRepository, SettingsRepository, SnapshotRepository};
use splitlink::error::AppError;
use splitlink::infrastructure::persistence::JsonStore;
use std::sync::Arc;

fn link(id: &str, code: &str) -> Link {
    Link::new(
        id.to_string(),
        code.to_string(),
        "https://example.com".to_string(),
        Utc::now(),
    )
}

#[tokio::test]
async fn test_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("links.json");

    let store = JsonStore::open(&path, Settings::new("s.example.com"))
        .await
        .unwrap();

    assert_eq!(store.link_count().await, 0);
    assert_eq!(
        store.get_settings().await.unwrap().default_domain,
        "s.example.com"
    );
    assert_eq!(store.path(), Some(path.as_path()));
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("links.json");

    {
        let store = JsonStore::open(&path, Settings::new("s.example.com"))
            .await
            .unwrap();
        store.save(link("id-1", "persist")).await.unwrap();

        let mut settings = store.get_settings().await.unwrap();
        settings.add_custom_domain("promo.example.com");
        store.save_settings(settings).await.unwrap();
    }

    let reopened = JsonStore::open(&path, Settings::new("other.example.com"))
        .await
        .unwrap();

    let stored = reopened.find_by_code("persist").await.unwrap().unwrap();
    assert_eq!(stored.id, "id-1");
    assert_eq!(stored.revision, 1);

    let settings = reopened.get_settings().await.unwrap();
    assert_eq!(settings.default_domain, "s.example.com");
    assert_eq!(settings.custom_domains, vec!["promo.example.com"]);
}

#[tokio::test]
async fn test_delete_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("links.json");

    let store = JsonStore::open(&path, Settings::new("s.example.com"))
        .await
        .unwrap();
    store.save(link("id-1", "one")).await.unwrap();
    assert!(store.delete("id-1").await.unwrap());
    drop(store);

    let reopened = JsonStore::open(&path, Settings::new("s.example.com"))
        .await
        .unwrap();
    assert_eq!(reopened.link_count().await, 0);
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("links.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let result = JsonStore::open(&path, Settings::new("s.example.com")).await;

    assert!(matches!(result, Err(AppError::Persistence { .. })));
}

#[tokio::test]
async fn test_import_replaces_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("links.json");

    let store = JsonStore::open(&path, Settings::new("s.example.com"))
        .await
        .unwrap();
    store.save(link("id-1", "old")).await.unwrap();

    let mut snapshot = Snapshot::empty(Settings::new("new.example.com"));
    snapshot.links.push(link("id-2", "new"));
    store.import_all(snapshot).await.unwrap();
    drop(store);

    let reopened = JsonStore::open(&path, Settings::new("s.example.com"))
        .await
        .unwrap();
    let exported = reopened.export_all().await.unwrap();

    assert_eq!(exported.links.len(), 1);
    assert_eq!(exported.links[0].short_code, "new");
    assert_eq!(exported.settings.default_domain, "new.example.com");
}

#[tokio::test]
async fn test_stale_revision_conflicts() {
    let store = JsonStore::in_memory(Settings::new("s.example.com"));

    let first = store.save(link("id-1", "race")).await.unwrap();
    let mut a = first.clone();
    let mut b = first;

    a.is_active = false;
    store.save(a).await.unwrap();

    b.original_url = "https://other.example.com".to_string();
    let result = store.save(b).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn test_click_metadata_timestamp_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("links.json");

    {
        let store = Arc::new(
            JsonStore::open(&path, Settings::new("s.example.com"))
                .await
                .unwrap(),
        );
        store.save(link("id-1", "clicked")).await.unwrap();

        let mut metadata = Map::new();
        metadata.insert("timestamp".to_string(), json!("client-time"));
        StatsService::new(store)
            .track_click("clicked", metadata)
            .await
            .unwrap()
            .unwrap();
    }

    let reopened = JsonStore::open(&path, Settings::new("s.example.com"))
        .await
        .unwrap();

    let stored = reopened.find_by_code("clicked").await.unwrap().unwrap();
    assert_eq!(stored.stats.total_clicks, 1);
    assert_eq!(
        stored.stats.click_timestamps[0].metadata[CLIENT_TIMESTAMP_KEY],
        "client-time"
    );
}

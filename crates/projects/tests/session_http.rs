#![allow(clippy::unwrap_used, clippy::expect_used)]
use std::{sync::Arc, time::Duration};

use {
    mockito::Matcher,
    monster_projects::{
        DurableStorage, FileStorage, HttpNovelApi, MemoryStorage, NovelId, ProjectSession,
    },
    serde_json::json,
};

const KEY: &str = "monster_active_project_id";

fn session_for(server: &mockito::Server, storage: Arc<dyn DurableStorage>) -> ProjectSession {
    let api = HttpNovelApi::new(&format!("{}/api", server.url()), Duration::from_secs(5)).unwrap();
    ProjectSession::new(Arc::new(api), storage, KEY)
}

#[tokio::test]
async fn restores_numeric_project_from_persisted_string_id() {
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/api/novels")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{"id": 42, "title": "A"}, {"id": 7, "title": "B"}]).to_string())
        .create_async()
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "42").unwrap();
    let session = session_for(&server, storage);

    session.load_projects().await;

    let current = session.current_project().unwrap();
    assert_eq!(current.id, NovelId::Number(42));
    assert_eq!(current.title, "A");
    let titles: Vec<String> = session.projects().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, ["A", "B"]);
    list.assert_async().await;
}

#[tokio::test]
async fn unusual_field_shapes_do_not_empty_the_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/novels")
        .with_status(200)
        .with_body(
            json!([
                {"id": 42, "title": "A", "updated_at": 1_700_000_000},
                {"id": 7, "title": "B", "outline": {"acts": 3}, "description": ["d"]}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "42").unwrap();
    let session = session_for(&server, storage);

    session.load_projects().await;

    assert_eq!(session.projects().len(), 2);
    let current = session.current_project().unwrap();
    assert_eq!(current.updated_at, Some(json!(1_700_000_000)));
    let second = session.find_project("7").unwrap();
    assert_eq!(second.outline, Some(json!({"acts": 3})));
    assert_eq!(second.description_text(), None);
}

#[tokio::test]
async fn persisted_id_missing_from_list_restores_nothing() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/novels")
        .with_status(200)
        .with_body(json!([{"id": 42, "title": "A"}]).to_string())
        .create_async()
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "99").unwrap();
    let session = session_for(&server, storage);

    session.load_projects().await;

    assert!(session.current_project().is_none());
    assert_eq!(session.projects().len(), 1);
}

#[tokio::test]
async fn server_error_on_load_is_swallowed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/novels")
        .with_status(503)
        .create_async()
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "42").unwrap();
    let session = session_for(&server, storage);

    session.load_projects().await;

    assert!(!session.has_projects());
    assert!(session.current_project().is_none());
    assert_eq!(session.persisted_project_id().as_deref(), Some("42"));
}

#[tokio::test]
async fn create_appends_and_persists_server_novel() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/api/novels")
        .match_body(Matcher::PartialJson(json!({"title": "T", "description": "D"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "success",
                "novel": {"id": "500", "title": "T", "description": "D"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().join("session.json")));
    let session = session_for(&server, storage.clone());

    let created = session.create_project("T", "D", None).await.unwrap();

    assert_eq!(created.id, NovelId::from("500"));
    assert_eq!(session.projects().len(), 1);
    assert!(session.current_project().unwrap().id.matches("500"));
    assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("500"));
    create.assert_async().await;
}

#[tokio::test]
async fn rejected_create_returns_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/novels")
        .with_status(422)
        .create_async()
        .await;

    let session = session_for(&server, Arc::new(MemoryStorage::new()));
    let err = session.create_project("T", "D", Some("short")).await.unwrap_err();

    assert!(err.to_string().contains("422"));
    assert!(!session.has_projects());
    assert!(session.current_project().is_none());
}

#[tokio::test]
async fn deleting_active_project_clears_everything() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/novels")
        .with_status(200)
        .with_body(json!([{"id": "500", "title": "T"}, {"id": "501", "title": "U"}]).to_string())
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/api/novels/500")
        .with_status(200)
        .with_body(json!({"status": "success", "message": "Novel deleted"}).to_string())
        .create_async()
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "500").unwrap();
    let session = session_for(&server, storage.clone());
    session.load_projects().await;
    assert!(session.current_project().unwrap().id.matches("500"));

    assert!(session.delete_project(&NovelId::from("500")).await);

    assert!(session.find_project("500").is_none());
    assert!(session.find_project("501").is_some());
    assert!(session.current_project().is_none());
    assert!(storage.get(KEY).unwrap().is_none());
    delete.assert_async().await;
}

#[tokio::test]
async fn missing_novel_on_delete_reports_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/novels/404")
        .with_status(404)
        .with_body(json!({"detail": "Novel not found"}).to_string())
        .create_async()
        .await;

    let session = session_for(&server, Arc::new(MemoryStorage::new()));
    assert!(!session.delete_project(&NovelId::Number(404)).await);
}

mod common;

use axum::http::StatusCode;
use common::{create_collection, create_issue, send, test_app};
use serde_json::json;

#[tokio::test]
async fn index_reports_liveness() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Backend for Comic Collection App is running!"));
}

#[tokio::test]
async fn health_reports_service_name() {
    let (_dir, app) = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "comic-shelf");
}

#[tokio::test]
async fn create_returns_row_with_fresh_id() {
    let (_dir, app) = test_app().await;

    let first = create_collection(&app, r#"{"title":"Saga"}"#).await;
    let second = create_collection(&app, r#"{"title":"Saga"}"#).await;

    assert_eq!(first["title"], "Saga");
    assert_eq!(first["volume"], json!(null));
    assert_eq!(first["publication_years"], json!(null));
    assert_eq!(first["cover_image_url"], json!(null));
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn create_without_title_persists_nothing() {
    let (_dir, app) = test_app().await;

    for body in [Some(r#"{"volume":"1"}"#), Some(r#"{"title":""}"#), None] {
        let (status, value) = send(&app, "POST", "/collections", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["error"], "Title is required");
    }

    let (status, list) = send(&app, "GET", "/collections", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (_dir, app) = test_app().await;
    let (status, value) = send(&app, "POST", "/collections", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn list_is_sorted_by_title() {
    let (_dir, app) = test_app().await;
    for title in ["Batman", "Avengers", "Cable"] {
        create_collection(&app, &json!({ "title": title }).to_string()).await;
    }

    let (status, list) = send(&app, "GET", "/collections", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Avengers", "Batman", "Cable"]);
}

#[tokio::test]
async fn detail_round_trips_fields_and_orders_issues_as_text() {
    let (_dir, app) = test_app().await;
    let payload = json!({
        "title": "Uncanny X-Men",
        "volume": "Vol. 1",
        "publication_years": "1963–2011",
        "cover_image_url": "https://example.com/x men.jpg?size=L"
    });
    let created = create_collection(&app, &payload.to_string()).await;
    let id = created["id"].as_i64().unwrap();

    for number in ["2", "10", "1"] {
        create_issue(&app, id, &json!({ "issue_number": number }).to_string()).await;
    }

    let (status, detail) = send(&app, "GET", &format!("/collections/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["title", "volume", "publication_years", "cover_image_url"] {
        assert_eq!(detail[field], payload[field], "field {field}");
    }

    let numbers: Vec<&str> = detail["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["issue_number"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, ["1", "10", "2"]);
}

#[tokio::test]
async fn unknown_collection_is_404() {
    let (_dir, app) = test_app().await;
    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, method, "/collections/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Collection not found");
    }
    let (status, _) = send(&app, "PUT", "/collections/9999", Some(r#"{"title":"Y"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_is_not_found() {
    let (_dir, app) = test_app().await;
    for (method, uri) in [
        ("GET", "/collections/abc"),
        ("DELETE", "/collections/abc"),
        ("GET", "/collections/1.5/stats"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body["error"], "Collection not found");
    }

    let (status, _) = send(&app, "PUT", "/collections/abc", Some(r#"{"title":"Y"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() {
    let (_dir, app) = test_app().await;
    let created = create_collection(&app, r#"{"title":"X","volume":"1"}"#).await;
    let uri = format!("/collections/{}", created["id"]);

    let (status, updated) = send(&app, "PUT", &uri, Some(r#"{"volume":"2"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "X");
    assert_eq!(updated["volume"], "2");

    let (status, cleared) = send(&app, "PUT", &uri, Some(r#"{"volume":null}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["volume"], json!(null));
    assert_eq!(cleared["title"], "X");
}

#[tokio::test]
async fn empty_update_echoes_row_with_message() {
    let (_dir, app) = test_app().await;
    let created = create_collection(&app, r#"{"title":"X","volume":"1"}"#).await;
    let uri = format!("/collections/{}", created["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some("{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No fields to update provided");
    assert_eq!(body["data"], created);
}

#[tokio::test]
async fn update_without_body_is_bad_request() {
    let (_dir, app) = test_app().await;
    let created = create_collection(&app, r#"{"title":"X"}"#).await;
    let uri = format!("/collections/{}", created["id"]);

    let (status, body) = send(&app, "PUT", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided for update");

    let (status, _) = send(&app, "PUT", &uri, Some(r#"{"title":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_cascades_to_issues() {
    let (_dir, app) = test_app().await;
    let created = create_collection(&app, r#"{"title":"Spawn"}"#).await;
    let id = created["id"].as_i64().unwrap();
    let issue = create_issue(&app, id, r#"{"issue_number":"1"}"#).await;

    let (status, body) = send(&app, "DELETE", &format!("/collections/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Collection deleted successfully");

    let (status, _) = send(&app, "GET", &format!("/collections/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/issues/{}", issue["id"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_summarise_ownership() {
    let (_dir, app) = test_app().await;
    let created = create_collection(&app, r#"{"title":"Preacher"}"#).await;
    let id = created["id"].as_i64().unwrap();

    let (status, empty) = send(&app, "GET", &format!("/collections/{id}/stats"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["total"], 0);
    assert_eq!(empty["percentage"], 0);

    create_issue(&app, id, r#"{"issue_number":"1","is_owned":true}"#).await;
    create_issue(&app, id, r#"{"issue_number":"2"}"#).await;

    let (_, stats) = send(&app, "GET", &format!("/collections/{id}/stats"), None).await;
    assert_eq!(stats["collection_id"], id);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["owned"], 1);
    assert_eq!(stats["missing"], 1);
    assert_eq!(stats["percentage"], 50);

    let (status, _) = send(&app, "GET", "/collections/9999/stats", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (_dir, app) = test_app().await;
    let title = "a".repeat(128 * 1024);
    let body = json!({ "title": title }).to_string();

    let (status, value) = send(&app, "POST", "/collections", Some(&body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(value["error"], "request body too large");
}

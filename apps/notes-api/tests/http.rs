use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use notes_api::{routes, state::AppState};
use notes_config::Notes;
use notes_service::NoteStore;
use notes_testkit::{FailingStore, MemoryStore};

const TABLE: &str = "Note";

fn app(store: Arc<dyn NoteStore>) -> Router {
	routes::router(AppState::with_store(Notes::default(), store))
}

fn memory_app() -> (Arc<MemoryStore>, Router) {
	let store = Arc::new(MemoryStore::new());

	(store.clone(), app(store))
}

async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
	let body = match body {
		Some(value) => Body::from(value.to_string()),
		None => Body::empty(),
	};
	let response = app
		.oneshot(
			Request::builder()
				.method(method)
				.uri(uri)
				.header("content-type", "application/json")
				.body(body)
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call router.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Failed to parse response.")
	};

	(status, json)
}

#[tokio::test]
async fn health_ok() {
	let (_, app) = memory_app();
	let (status, body) = call(app, "GET", "/health", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn create_assigns_an_id() {
	let (store, app) = memory_app();
	let (status, body) =
		call(app, "POST", "/api/notes/", Some(json!({ "title": "Hello", "content": "World" }))).await;

	assert_eq!(status, StatusCode::CREATED);

	let id = body["id"].as_str().expect("Expected an id.");

	assert!(!id.is_empty());
	assert_eq!(body["title"], "Hello");
	assert!(body["createdAt"].is_string());
	assert!(store.get(TABLE, id).is_some());
}

#[tokio::test]
async fn create_without_title_reports_field_errors() {
	let (_, app) = memory_app();
	let (status, body) = call(app, "POST", "/api/notes", Some(json!({ "content": "x" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error_code"], "VALIDATION_FAILED");
	assert_eq!(body["message"], "Validation failed for title.");
	assert_eq!(body["fields"]["title"][0], "This field is required.");
}

#[tokio::test]
async fn malformed_json_is_an_invalid_request() {
	let (_, app) = memory_app();
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/api/notes/")
				.header("content-type", "application/json")
				.body(Body::from("{\"title\":"))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call router.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let body: Value = serde_json::from_slice(&bytes).expect("Failed to parse response.");

	assert_eq!(body["error_code"], "INVALID_REQUEST");
	assert_eq!(body["fields"], Value::Null);
}

#[tokio::test]
async fn retrieve_missing_note_is_404() {
	let (_, app) = memory_app();
	let (status, body) = call(app, "GET", "/api/notes/does-not-exist/", None).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error_code"], "NOT_FOUND");
	assert_eq!(body["message"], "Not found");
}

#[tokio::test]
async fn retrieve_returns_only_note_fields() {
	let (store, app) = memory_app();

	store.insert(TABLE, json!({ "id": "n1", "title": "T", "content": null, "owner": "x" }));

	let (status, body) = call(app, "GET", "/api/notes/n1", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "id": "n1", "title": "T" }));
}

#[tokio::test]
async fn list_clamps_limit_and_rejects_garbage() {
	let (store, app) = memory_app();

	for i in 0..3 {
		store.insert(TABLE, json!({ "id": format!("n{i}"), "title": "T" }));
	}

	let (status, body) = call(app.clone(), "GET", "/api/notes/?limit=0", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["results"].as_array().map(Vec::len), Some(1));
	assert_eq!(body["nextPage"], "1");

	let (status, body) = call(app.clone(), "GET", "/api/notes/?limit=-10&page=2", None).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["results"][0]["id"], "n2");
	assert_eq!(body["nextPage"], Value::Null);

	let (status, _) = call(app.clone(), "GET", "/api/notes/?limit=500", None).await;

	assert_eq!(status, StatusCode::OK);

	let (status, body) = call(app, "GET", "/api/notes/?limit=abc", None).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error_code"], "INVALID_REQUEST");
	assert_eq!(body["message"], "limit must be an integer");
	assert_eq!(store.page_sizes(), vec![1, 1, 200]);
}

#[tokio::test]
async fn patch_content_keeps_title() {
	let (store, app) = memory_app();

	store.insert(TABLE, json!({ "id": "n1", "title": "Original", "content": "old" }));

	let (status, body) =
		call(app, "PATCH", "/api/notes/n1/", Some(json!({ "content": "new" }))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["title"], "Original");
	assert_eq!(body["content"], "new");
	assert_eq!(store.get(TABLE, "n1").expect("Expected record.")["content"], "new");
}

#[tokio::test]
async fn put_without_title_is_rejected() {
	let (store, app) = memory_app();

	store.insert(TABLE, json!({ "id": "n1", "title": "Original" }));

	let (status, body) = call(app, "PUT", "/api/notes/n1", Some(json!({ "content": "x" }))).await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert!(body["fields"]["title"].is_array());
}

#[tokio::test]
async fn put_on_missing_note_is_404_even_with_bad_body() {
	let (_, app) = memory_app();
	let (status, _) = call(app, "PUT", "/api/notes/ghost/", Some(json!("not an object"))).await;

	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_always_returns_204() {
	let (store, app) = memory_app();

	store.insert(TABLE, json!({ "id": "n1", "title": "T" }));

	let (status, _) = call(app.clone(), "DELETE", "/api/notes/n1/", None).await;

	assert_eq!(status, StatusCode::NO_CONTENT);
	assert!(store.is_empty());

	let (status, _) = call(app, "DELETE", "/api/notes/never-existed", None).await;

	assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn remote_outage_maps_to_502_with_message() {
	let app = app(Arc::new(FailingStore::outage("Onyx is down for maintenance")));
	let requests = [
		("GET", "/api/notes/", None),
		("GET", "/api/notes/n1/", None),
		("POST", "/api/notes/", Some(json!({ "title": "T" }))),
		("PUT", "/api/notes/n1/", Some(json!({ "title": "T" }))),
		("PATCH", "/api/notes/n1/", Some(json!({}))),
		("DELETE", "/api/notes/n1/", None),
	];

	for (method, uri, body) in requests {
		let (status, json) = call(app.clone(), method, uri, body).await;

		assert_eq!(status, StatusCode::BAD_GATEWAY, "{method} {uri}");
		assert_eq!(json["error_code"], "UPSTREAM_ERROR");
		assert_eq!(json["message"], "Onyx is down for maintenance");
	}
}

#[tokio::test]
async fn missing_credentials_fail_at_request_time() {
	let app = routes::router(AppState::new(&notes_testkit::test_config()));
	let (status, body) = call(app, "GET", "/api/notes/n1/", None).await;

	assert_eq!(status, StatusCode::BAD_GATEWAY);
	assert!(
		body["message"].as_str().is_some_and(|message| message.contains("database_id is missing")),
		"{body}"
	);
}

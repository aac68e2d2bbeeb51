use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use kadoc_server::state::AppState;

fn app() -> Router {
    kadoc_server::app(AppState::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn snippet_body(title: &str, code: &str) -> Value {
    json!({
        "title": title,
        "language": "python",
        "description": "",
        "code": code,
        "complexity": 2,
        "references": []
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn created_snippet_can_be_fetched_by_id() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/snippets",
        Some(snippet_body("Fizzbuzz", "for i in range(100): pass")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["title"], "Fizzbuzz");
    assert!(created.get("createdAt").is_some());

    let (status, fetched) = send(&app, Method::GET, &format!("/api/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn unknown_snippet_is_404_with_error_body() {
    let (status, body) = send(&app(), Method::GET, "/api/snippets/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn listing_is_newest_first_and_filtered_case_insensitively() {
    let app = app();
    for (title, code) in [
        ("Parse JSON", "json.loads(s)"),
        ("Read file", "open(path).read()"),
        ("Dump JSON", "json.dumps(v)"),
    ] {
        let (status, _) =
            send(&app, Method::POST, "/api/snippets", Some(snippet_body(title, code))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, all) = send(&app, Method::GET, "/api/snippets", None).await;
    let titles: Vec<_> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dump JSON", "Read file", "Parse JSON"]);

    let (_, filtered) = send(&app, Method::GET, "/api/snippets?q=JsOn", None).await;
    let titles: Vec<_> = filtered
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dump JSON", "Parse JSON"]);
}

#[tokio::test]
async fn zero_complexity_defaults_to_one() {
    let mut body = snippet_body("Hello", "print('hi')");
    body["complexity"] = json!(0);

    let (status, created) = send(&app(), Method::POST, "/api/snippets", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["complexity"], 1);
}

#[tokio::test]
async fn invalid_snippet_is_rejected_with_400() {
    let mut body = snippet_body("", "print('hi')");
    body["complexity"] = json!(7);

    let (status, error) = send(&app(), Method::POST, "/api/snippets", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = error["error"].as_str().unwrap();
    assert!(message.contains("title"));
    assert!(message.contains("complexity"));
}

#[tokio::test]
async fn malformed_json_is_rejected_with_error_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/articles")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn snippet_update_records_previous_code_in_history() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/snippets",
        Some(snippet_body("Counter", "v1")),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    for code in ["v2", "v3"] {
        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/snippets/{id}"),
            Some(snippet_body("Counter", code)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["code"], code);
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    let (status, history) =
        send(&app, Method::GET, &format!("/api/snippets/{id}/history"), None).await;
    assert_eq!(status, StatusCode::OK);
    let versions: Vec<_> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|v| (v["version"].as_u64().unwrap(), v["code"].as_str().unwrap()))
        .collect();
    assert_eq!(versions, vec![(1, "v1"), (2, "v2")]);
}

#[tokio::test]
async fn articles_round_trip_with_category() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/articles",
        Some(json!({ "title": "Setup guide", "category": "Setup", "content": "# Install" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["category"], "Setup");

    let (_, listed) = send(&app, Method::GET, "/api/articles", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let id = created["id"].as_str().unwrap();
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/articles/{id}"),
        Some(json!({ "title": "Setup guide v2", "category": "Guide", "content": "# Install" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Setup guide v2");
    assert_eq!(updated["category"], "Guide");
}

#[tokio::test]
async fn preflight_request_is_answered_with_cors_headers() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/snippets")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn internal_errors_are_masked() {
    use axum::response::IntoResponse;
    use kadoc_server::error::ApiError;

    let response = ApiError::Internal("handler panicked".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "error": "internal server error" }));
}

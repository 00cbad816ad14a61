use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::helpers::{API_KEY, SEARCH_ENGINE_ID, SEARCH_PATH, StubAcquirer, TestApp};

#[tokio::test]
async fn download_returns_success_envelope_for_a_resolved_query() {
    let app =
        TestApp::spawn_app(StubAcquirer::succeeding_with("https://cdn/example/audio1.mp3")).await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("key", API_KEY))
        .and(query_param("cx", SEARCH_ENGINE_ID))
        .and(query_param("q", "lofi hip hop youtube"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"title": "Lofi Beats", "link": "https://example/video1"}]
        })))
        .expect(1)
        .mount(&app.search_server)
        .await;

    let response = app
        .post_download(serde_json::json!({"query": "  lofi hip hop "}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Response was not JSON.");
    assert_eq!(
        body,
        serde_json::json!({
            "status": "success",
            "title": "Lofi Beats",
            "audio_url": "https://cdn/example/audio1.mp3"
        })
    );
    assert_eq!(app.acquirer.links(), vec!["https://example/video1"]);
}

#[tokio::test]
async fn only_the_first_search_result_is_downloaded() {
    let app = TestApp::spawn_app(StubAcquirer::succeeding_with("https://cdn/first.mp3")).await;
    app.mount_search_items(serde_json::json!([
        {"title": "First", "link": " https://example/first \n"},
        {"title": "Second", "link": "https://example/second"}
    ]))
    .await;

    let body: serde_json::Value = app
        .post_download(serde_json::json!({"query": "anything"}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "success");
    assert_eq!(body["title"], "First");
    assert_eq!(app.acquirer.links(), vec!["https://example/first"]);
}

#[tokio::test]
async fn zero_search_results_never_reach_the_downloader() {
    let app = TestApp::spawn_app(StubAcquirer::succeeding_with("https://cdn/unused.mp3")).await;
    app.mount_search_items(serde_json::json!([])).await;

    let response = app
        .post_download(serde_json::json!({"query": "no such song"}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "failure");
    assert_eq!(body["error"]["kind"], "resolution_failure");
    assert!(body.get("title").is_none());
    assert_eq!(app.acquirer.calls(), 0);
}

#[tokio::test]
async fn search_api_errors_produce_a_failure_envelope() {
    let app = TestApp::spawn_app(StubAcquirer::succeeding_with("https://cdn/unused.mp3")).await;

    for status in [400, 403, 500] {
        let _guard = Mock::given(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("search is unhappy"))
            .expect(1)
            .mount_as_scoped(&app.search_server)
            .await;

        let body: serde_json::Value = app
            .post_download(serde_json::json!({"query": "lofi"}))
            .await
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "failure", "status {} was not a failure", status);
        assert_eq!(body["error"]["kind"], "resolution_failure");
        assert!(
            !body["error"]["message"].as_str().unwrap().is_empty(),
            "status {} produced an empty error message",
            status
        );
    }
    assert_eq!(app.acquirer.calls(), 0);
}

#[tokio::test]
async fn downloader_failures_produce_a_failure_envelope() {
    let app = TestApp::spawn_app(StubAcquirer::failing()).await;
    app.mount_search_items(serde_json::json!([
        {"title": "Lofi Beats", "link": "https://example/video1"}
    ]))
    .await;

    let body: serde_json::Value = app
        .post_download(serde_json::json!({"query": "lofi hip hop"}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "failure");
    assert_eq!(body["error"]["kind"], "acquisition_failure");
    assert!(body.get("title").is_none());
    assert!(body.get("audio_url").is_none());
    assert_eq!(app.acquirer.calls(), 1);
}

#[tokio::test]
async fn empty_query_is_still_searched() {
    let app = TestApp::spawn_app(StubAcquirer::succeeding_with("https://cdn/any.mp3")).await;

    Mock::given(path(SEARCH_PATH))
        .and(query_param("q", " youtube"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"title": "Whatever", "link": "https://example/whatever"}]
        })))
        .expect(1)
        .mount(&app.search_server)
        .await;

    let body: serde_json::Value = app
        .post_download(serde_json::json!({"query": "   "}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn download_returns_422_when_query_is_missing() {
    let app = TestApp::spawn_app(StubAcquirer::failing()).await;
    let test_cases = vec![
        (serde_json::json!({}), "missing the query"),
        (serde_json::json!({"query": 42}), "query is not a string"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = app.post_download(invalid_body).await;

        assert_eq!(
            response.status().as_u16(),
            422,
            "The API did not fail with 422 Unprocessable Entity when payload was {}.",
            error_message
        );
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = TestApp::spawn_app(StubAcquirer::failing()).await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/download", app.address))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

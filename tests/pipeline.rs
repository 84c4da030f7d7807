// tests/pipeline.rs
use serde_json::{json, Value};
use std::fs;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use country_leaders::aggregator::LeaderScraper;
use country_leaders::client::ApiClient;
use country_leaders::config::{ApiConfig, ErrorPolicy, RunConfig};
use country_leaders::error::FetchError;
use country_leaders::persist;

const COOKIE: &str = "user_cookie=abc";

async fn api_server(expected_cookie_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cookie"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "user_cookie=abc; Path=/"))
        .expect(expected_cookie_calls)
        .mount(&server)
        .await;
    server
}

async fn mount_countries(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/countries"))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_leaders(server: &MockServer, country: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/leaders"))
        .and(query_param("country", country))
        .and(header("cookie", COOKIE))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

// Pages must be requested exactly once per leader.
async fn mount_page(server: &MockServer, page: &str, status: u16, paragraphs: &[&str]) -> String {
    let body: String = paragraphs.iter().map(|p| format!("<p>{}</p>", p)).collect();
    let html = format!("<html><body><div id=\"content\">{}</div></body></html>", body);
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(status).set_body_string(html))
        .expect(1)
        .mount(server)
        .await;
    format!("{}{}", server.uri(), page)
}

fn scraper(server: &MockServer, policy: ErrorPolicy) -> LeaderScraper {
    let api = ApiConfig::new(&server.uri()).unwrap();
    LeaderScraper::new(ApiClient::new(api, None).unwrap(), policy)
}

fn run_config(server: &MockServer, output: &std::path::Path, policy: ErrorPolicy) -> RunConfig {
    let mut config = RunConfig::new(ApiConfig::new(&server.uri()).unwrap());
    config.output = output.to_path_buf();
    config.on_leaders_error = policy;
    config
}

fn fetch_error(err: &anyhow::Error) -> &FetchError {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<FetchError>())
        .expect("error chain should contain a FetchError")
}

#[tokio::test]
async fn writes_matching_and_fallback_paragraphs() {
    let server = api_server(2).await;
    let trump = mount_page(
        &server,
        "/wiki/Donald_Trump",
        200,
        &[
            "Donald John Trump is an American politician.",
            "Trump was born on June 14, 1946, in Queens.",
            "He graduated in 1968, long after 1946.",
        ],
    )
    .await;
    let nobody = mount_page(&server, "/wiki/Nobody", 200, &["First.", "Second.", "Third.", ""]).await;

    mount_countries(&server, 200, json!(["us"])).await;
    mount_leaders(
        &server,
        "us",
        200,
        json!([
            {"id": "Q22686", "first_name": "Donald", "last_name": "Trump",
             "birth_date": "1946-06-14", "wikipedia_url": trump},
            {"id": "Q0", "first_name": "No", "last_name": "Body", "wikipedia_url": nobody}
        ]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("leaders_data.json");
    let stats = country_leaders::run(&run_config(&server, &output, ErrorPolicy::Skip))
        .await
        .unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "us": [
                {
                    "wikipedia_url": trump,
                    "first_name": "Donald",
                    "last_name": "Trump",
                    "first_paragraph": "Trump was born on June 14, 1946, in Queens."
                },
                {
                    "wikipedia_url": nobody,
                    "first_name": "No",
                    "last_name": "Body",
                    "first_paragraph": "Third."
                }
            ]
        })
    );
    assert_eq!(stats.countries_fetched, 1);
    assert_eq!(stats.leaders_written, 2);
}

#[tokio::test]
async fn failing_country_is_skipped_without_aborting() {
    let server = api_server(3).await;
    let page = mount_page(&server, "/wiki/Leader", 200, &["Born 1950."]).await;
    mount_countries(&server, 200, json!(["us", "xx"])).await;
    mount_leaders(
        &server,
        "us",
        200,
        json!([{"first_name": "A", "last_name": "B", "birth_date": "1950-01-01", "wikipedia_url": page}]),
    )
    .await;
    mount_leaders(&server, "xx", 404, json!({"message": "not found"})).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("leaders_data.json");
    let stats = country_leaders::run(&run_config(&server, &output, ErrorPolicy::Skip))
        .await
        .unwrap();

    let written = persist::from_json_file(&output).unwrap();
    assert_eq!(written.countries().collect::<Vec<_>>(), vec!["us"]);
    assert!(written.get("xx").is_none());
    assert_eq!(stats.countries_skipped, 1);
    assert_eq!(stats.countries_listed, 2);
}

#[tokio::test]
async fn failing_country_aborts_under_abort_policy() {
    let server = api_server(2).await;
    mount_countries(&server, 200, json!(["xx", "us"])).await;
    mount_leaders(&server, "xx", 404, json!({"message": "not found"})).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("leaders_data.json");
    let err = country_leaders::run(&run_config(&server, &output, ErrorPolicy::Abort))
        .await
        .unwrap_err();

    assert_eq!(fetch_error(&err).status(), Some(404));
    assert!(!output.exists());
}

#[tokio::test]
async fn countries_failure_aborts_the_run() {
    let server = api_server(1).await;
    mount_countries(&server, 500, json!({"message": "boom"})).await;

    let err = scraper(&server, ErrorPolicy::Skip).collect().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn records_without_wikipedia_url_are_dropped() {
    let server = api_server(1).await;
    let page = mount_page(&server, "/wiki/Kept", 200, &["Kept, born 1901."]).await;
    mount_leaders(
        &server,
        "be",
        200,
        json!([
            {"first_name": "Null", "last_name": "Url", "birth_date": "1900-01-01", "wikipedia_url": null},
            {"first_name": "Kept", "last_name": "Leader", "birth_date": "1901-01-01", "wikipedia_url": page},
            {"first_name": "Missing", "last_name": "Url"}
        ]),
    )
    .await;

    let result = scraper(&server, ErrorPolicy::Skip).get_leaders("be").await.unwrap();
    assert_eq!(result.country, "be");
    assert_eq!(result.leaders.len(), 1);
    assert_eq!(result.leaders[0].first_name.as_deref(), Some("Kept"));
    assert_eq!(result.leaders[0].first_paragraph, "Kept, born 1901.");
    assert_eq!(result.without_url, 2);
}

#[tokio::test]
async fn error_pages_are_still_parsed() {
    let server = api_server(1).await;
    let page = mount_page(&server, "/wiki/Gone", 404, &["Wikipedia does not have an article."]).await;
    mount_leaders(
        &server,
        "fr",
        200,
        json!([{"first_name": "G", "last_name": "One", "birth_date": "1800-01-01", "wikipedia_url": page}]),
    )
    .await;

    let result = scraper(&server, ErrorPolicy::Abort).get_leaders("fr").await.unwrap();
    assert_eq!(result.leaders[0].first_paragraph, "Wikipedia does not have an article.");
}

#[tokio::test]
async fn unreachable_page_aborts_even_when_skipping() {
    let server = api_server(2).await;
    mount_countries(&server, 200, json!(["us"])).await;
    mount_leaders(
        &server,
        "us",
        200,
        json!([{"first_name": "A", "last_name": "B", "wikipedia_url": "http://127.0.0.1:1/wiki/Unreachable"}]),
    )
    .await;

    let err = scraper(&server, ErrorPolicy::Skip).collect().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
}

#[tokio::test]
async fn output_keeps_country_order() {
    let server = api_server(4).await;
    mount_countries(&server, 200, json!(["us", "be", "fr"])).await;
    for country in ["us", "be", "fr"] {
        mount_leaders(&server, country, 200, json!([])).await;
    }

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("leaders_data.json");
    country_leaders::run(&run_config(&server, &output, ErrorPolicy::Skip))
        .await
        .unwrap();

    let raw = fs::read_to_string(&output).unwrap();
    assert_eq!(raw, "{\n    \"us\": [],\n    \"be\": [],\n    \"fr\": []\n}");
}

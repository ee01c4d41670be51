//! Integration tests for `ExporterClient` and `extract_comments`.
//!
//! Uses `wiremock` to stand up a local export service for each test so no
//! real network traffic is made. Tests are grouped by scenario and cover
//! the start/poll/download happy paths and every error variant the client
//! can propagate.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use icsa_extractor::{extract_comments, ExportJob, ExporterClient, ExtractError, PollSettings};

const CSV_EXPORT: &str = "User,Comment,Likes\nalice,Great post,10\nbob,Love it,3\n";

/// Poll settings suitable for tests: short request timeout, 5-second poll
/// window, zero poll interval so tests never sleep.
fn test_settings() -> PollSettings {
    PollSettings {
        request_timeout_secs: 5,
        poll_timeout_secs: 5,
        poll_interval_ms: 0,
    }
}

fn test_client(base_url: &str) -> ExporterClient {
    ExporterClient::new(base_url, None, test_settings())
        .expect("failed to build test ExporterClient")
}

fn test_client_with_poll_timeout(base_url: &str, poll_timeout_secs: u64) -> ExporterClient {
    let settings = PollSettings {
        poll_timeout_secs,
        ..test_settings()
    };
    ExporterClient::new(base_url, None, settings).expect("failed to build test ExporterClient")
}

/// Minimal run fixture in the service's response envelope.
fn run_json(id: &str, status: &str) -> serde_json::Value {
    json!({"data": {"id": id, "status": status}})
}

/// Completed-run fixture carrying a download link.
fn completed_run_json(id: &str, link: &str) -> serde_json::Value {
    json!({"data": {"id": id, "status": "completed", "downloadUrl": link}})
}

fn plain_job(id: &str, status: &str, download_url: Option<&str>) -> ExportJob {
    ExportJob {
        id: id.to_string(),
        status: status.to_string(),
        download_url: download_url.map(str::to_string),
        file_url: None,
        result_url: None,
    }
}

// ---------------------------------------------------------------------------
// Test 1 – start_export posts the run request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_export_posts_url_and_returns_run_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exports"))
        .and(body_json(&json!({
            "postUrl": "https://instagram.com/p/abc123/",
            "format": "csv"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-1", "processing")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.start_export("https://instagram.com/p/abc123/").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let job = result.unwrap();
    assert_eq!(job.id, "run-1", "expected the run id from the response");
    assert_eq!(job.status, "processing");
}

#[tokio::test]
async fn start_export_propagates_api_error_for_5xx() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exports"))
        .respond_with(ResponseTemplate::new(500).set_body_string("export service down"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.start_export("https://instagram.com/p/abc123/").await;

    assert!(result.is_err(), "expected Err for 500 response");
    match result.unwrap_err() {
        ExtractError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "export service down");
        }
        other => panic!("expected ExtractError::Api, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test 2 – bearer auth
// ---------------------------------------------------------------------------

/// The mock only matches when the Authorization header is present, so a
/// successful call proves the key was attached.
#[tokio::test]
async fn requests_carry_bearer_auth_when_api_key_is_set() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exports"))
        .and(header("authorization", "Bearer secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-1", "processing")))
        .mount(&server)
        .await;

    let client = ExporterClient::new(
        &server.uri(),
        Some("secret-key".to_string()),
        test_settings(),
    )
    .expect("failed to build test ExporterClient");
    let result = client.start_export("https://instagram.com/p/abc123/").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

// ---------------------------------------------------------------------------
// Test 3 – polling to completion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wait_for_export_polls_until_the_run_completes() {
    let server = MockServer::start().await;

    // First two polls report the run still in progress.
    Mock::given(method("GET"))
        .and(path("/exports/run-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-1", "processing")))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    // Third poll reports completion.
    Mock::given(method("GET"))
        .and(path("/exports/run-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&completed_run_json("run-1", "/f.csv")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.wait_for_export("run-1").await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let job = result.unwrap();
    assert_eq!(job.status, "completed");
    assert_eq!(job.download_link(), Some("/f.csv"));
}

/// A `"partial"` status is not terminal; the client must keep polling
/// rather than accept an incomplete export.
#[tokio::test]
async fn wait_for_export_keeps_polling_through_partial_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exports/run-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-2", "partial")))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/exports/run-2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&completed_run_json("run-2", "/f.csv")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.wait_for_export("run-2").await;

    assert!(result.is_ok(), "expected Ok after partial, got: {result:?}");
    assert_eq!(result.unwrap().status, "completed");
}

// ---------------------------------------------------------------------------
// Test 4 – terminal failure statuses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wait_for_export_returns_job_failed_for_failed_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exports/run-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-3", "failed")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.wait_for_export("run-3").await;

    assert!(result.is_err(), "expected Err for failed run");
    match result.unwrap_err() {
        ExtractError::JobFailed { status } => assert_eq!(status, "failed"),
        other => panic!("expected ExtractError::JobFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn wait_for_export_returns_job_failed_for_cancelled_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exports/run-4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-4", "cancelled")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.wait_for_export("run-4").await;

    assert!(result.is_err(), "expected Err for cancelled run");
    assert!(
        matches!(result.unwrap_err(), ExtractError::JobFailed { .. }),
        "expected ExtractError::JobFailed"
    );
}

// ---------------------------------------------------------------------------
// Test 5 – poll deadline
// ---------------------------------------------------------------------------

/// With a zero-second poll window the client gets exactly one status check
/// before the deadline cuts it off.
#[tokio::test]
async fn wait_for_export_times_out_when_the_run_never_completes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exports/run-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-5", "processing")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_poll_timeout(&server.uri(), 0);
    let result = client.wait_for_export("run-5").await;

    assert!(result.is_err(), "expected Err after poll deadline");
    match result.unwrap_err() {
        ExtractError::Timeout { secs } => assert_eq!(secs, 0),
        other => panic!("expected ExtractError::Timeout, got: {other:?}"),
    }
}

#[tokio::test]
async fn wait_for_export_propagates_api_error_during_polling() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exports/run-6"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.wait_for_export("run-6").await;

    assert!(result.is_err(), "expected Err for 502 poll response");
    match result.unwrap_err() {
        ExtractError::Api { status, .. } => assert_eq!(status, 502),
        other => panic!("expected ExtractError::Api, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test 6 – downloading the export file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_export_downloads_bytes_from_the_download_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/run-7.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV_EXPORT))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let link = format!("{}/files/run-7.csv", server.uri());
    let job = plain_job("run-7", "completed", Some(&link));
    let result = client.fetch_export(&job).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap(), CSV_EXPORT.as_bytes());
}

#[tokio::test]
async fn fetch_export_resolves_relative_links_against_the_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/run-8.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV_EXPORT))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let job = plain_job("run-8", "completed", Some("/files/run-8.csv"));
    let result = client.fetch_export(&job).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(result.unwrap(), CSV_EXPORT.as_bytes());
}

#[tokio::test]
async fn fetch_export_falls_back_to_alternate_link_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/run-9.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV_EXPORT))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let job = ExportJob {
        id: "run-9".to_string(),
        status: "completed".to_string(),
        download_url: None,
        file_url: Some("/files/run-9.csv".to_string()),
        result_url: None,
    };
    let result = client.fetch_export(&job).await;

    assert!(result.is_ok(), "expected Ok via fileUrl, got: {result:?}");
    assert_eq!(result.unwrap(), CSV_EXPORT.as_bytes());
}

#[tokio::test]
async fn fetch_export_errors_when_the_run_has_no_link() {
    let server = MockServer::start().await;

    let client = test_client(&server.uri());
    let job = plain_job("run-10", "completed", None);
    let result = client.fetch_export(&job).await;

    assert!(result.is_err(), "expected Err for a run without a link");
    assert!(
        matches!(result.unwrap_err(), ExtractError::MissingDownload),
        "expected ExtractError::MissingDownload"
    );
}

// ---------------------------------------------------------------------------
// Test 7 – full extraction flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extract_comments_lands_a_timestamped_csv_in_the_download_dir() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-11", "processing")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/exports/run-11"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&completed_run_json("run-11", "/files/run-11.csv")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/run-11.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CSV_EXPORT))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let download_dir = dir.path().join("downloads");

    let client = test_client(&server.uri());
    let result = extract_comments(&client, "https://instagram.com/p/abc123/", &download_dir).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let saved = result.unwrap();
    let name = saved
        .file_name()
        .expect("saved path has no file name")
        .to_string_lossy();
    assert!(
        name.starts_with("instagram_comments_") && name.ends_with(".csv"),
        "expected timestamped CSV name, got: {name}"
    );
    let contents = std::fs::read_to_string(&saved).expect("failed to read saved file");
    assert_eq!(contents, CSV_EXPORT, "saved file should match the download");
}

/// An empty download is not a readable table; nothing may be written and
/// the download directory must not even be created.
#[tokio::test]
async fn extract_comments_rejects_an_unreadable_download() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&run_json("run-12", "processing")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/exports/run-12"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&completed_run_json("run-12", "/files/run-12.csv")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/run-12.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let download_dir = dir.path().join("downloads");

    let client = test_client(&server.uri());
    let result = extract_comments(&client, "https://instagram.com/p/abc123/", &download_dir).await;

    assert!(result.is_err(), "expected Err for empty download");
    assert!(
        matches!(result.unwrap_err(), ExtractError::InvalidFile(_)),
        "expected ExtractError::InvalidFile"
    );
    assert!(
        !download_dir.exists(),
        "download dir should not be created for an invalid file"
    );
}

//! Integration tests for the /api/list-reports endpoint.
//!
//! These tests verify:
//! - CSV filtering (case-insensitive) and listing-order preservation
//! - Timestamp normalization to UTC ISO-8601
//! - Empty container handling
//! - Configuration and storage error mapping to 500 responses

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use portfolio_gateway::error::StorageError;
use portfolio_gateway::reports::CONNECTION_STRING_VAR;
use portfolio_gateway::server::{create_router, RouterConfig};

use super::test_utils::MockReportSource;

// =============================================================================
// Basic Functionality Tests
// =============================================================================

#[tokio::test]
async fn test_list_reports_empty_container() {
    let source = MockReportSource::new();
    let router = create_router(source, RouterConfig::new());

    let request = Request::builder()
        .uri("/api/list-reports")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let result: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(result["reports"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_reports_filters_to_csv() {
    // 1700000000 = 2023-11-14T22:13:20Z
    let source = MockReportSource::new()
        .with_blob("q3-holdings.csv", 1700000000)
        .with_blob("readme.txt", 1700000000)
        .with_blob("Q4-HOLDINGS.CSV", 1700000000)
        .with_blob("archive/older.csv.bak", 1700000000);
    let router = create_router(source, RouterConfig::new());

    let request = Request::builder()
        .uri("/api/list-reports")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let result: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let reports = result["reports"].as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["report_title"], "q3-holdings.csv");
    assert_eq!(reports[1]["report_title"], "Q4-HOLDINGS.CSV");
}

#[tokio::test]
async fn test_list_reports_preserves_listing_order() {
    let source = MockReportSource::new()
        .with_blob("b.csv", 1700000000)
        .with_blob("a.csv", 1700000100)
        .with_blob("c.csv", 1700000200);
    let router = create_router(source, RouterConfig::new());

    let request = Request::builder()
        .uri("/api/list-reports")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let result: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let titles: Vec<&str> = result["reports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["report_title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["b.csv", "a.csv", "c.csv"]);
}

#[tokio::test]
async fn test_list_reports_formats_upload_date_as_utc() {
    let source = MockReportSource::new().with_blob("q3.csv", 1700000000);
    let router = create_router(source, RouterConfig::new());

    let request = Request::builder()
        .uri("/api/list-reports")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let result: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let reports = result["reports"].as_array().unwrap();
    assert_eq!(reports[0]["upload_date"], "2023-11-14T22:13:20Z");
}

#[tokio::test]
async fn test_list_reports_queries_storage_on_every_request() {
    let source = MockReportSource::new().with_blob("q3.csv", 1700000000);
    let calls = source.call_counter();
    let router = create_router(source, RouterConfig::new());

    for _ in 0..2 {
        let request = Request::builder()
            .uri("/api/list-reports")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // No cache sits between the handler and the storage listing
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_list_reports_missing_credential_names_variable() {
    let source =
        MockReportSource::new().with_failure(StorageError::MissingEnv(CONNECTION_STRING_VAR));
    let router = create_router(source, RouterConfig::new());

    let request = Request::builder()
        .uri("/api/list-reports")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error["error"],
        "Missing environment variable: AZURE_STORAGE_CONNECTION_STRING"
    );
}

#[tokio::test]
async fn test_list_reports_storage_failure_surfaces_message() {
    let source = MockReportSource::new()
        .with_failure(StorageError::Service("container not found".to_string()));
    let router = create_router(source, RouterConfig::new());

    let request = Request::builder()
        .uri("/api/list-reports")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "container not found");
}

#[tokio::test]
async fn test_list_reports_failure_does_not_affect_other_endpoints() {
    let source = MockReportSource::new().with_failure(StorageError::Service("down".to_string()));
    let router = create_router(source, RouterConfig::new());

    let request = Request::builder()
        .uri("/api/list-reports")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Request isolation: other endpoints keep working
    let request = Request::builder()
        .uri("/api/retrieve-price?symbol=AAPL")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

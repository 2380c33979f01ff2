#![allow(clippy::unwrap_used)]
// Integration tests for `Studio` using wiremock.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inkfly_api::{Credentials, RuntimeClient, TransportConfig};
use inkfly_core::{ApiResult, Category, DiscoveryCache, Studio, StudioConfig};

// ── Helpers ─────────────────────────────────────────────────────────

fn studio_for(server: &MockServer, ttl: Duration) -> Studio {
    let client = RuntimeClient::with_urls(
        Credentials::new("k1", "s1").unwrap(),
        &TransportConfig::default(),
        &server.uri(),
        &format!("{}/fetch-raster", server.uri()),
    )
    .unwrap();
    Studio::with_client(client, Arc::new(DiscoveryCache::new()), ttl)
}

async fn setup() -> (MockServer, Studio) {
    let server = MockServer::start().await;
    let studio = studio_for(&server, Duration::hours(24));
    (server, studio)
}

fn category(id: &str, title: &str) -> Category {
    Category {
        id: id.to_owned(),
        title: title.to_owned(),
    }
}

// ── Category listing and cache ──────────────────────────────────────

#[tokio::test]
async fn test_second_categories_call_within_ttl_hits_cache() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "cards", "title": "Business Cards"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let first = studio.categories().await;
    let second = studio.categories().await;

    assert_eq!(first.data(), Some(&vec![category("cards", "Business Cards")]));
    assert_eq!(first, second);
    // Mock verification on drop asserts the single network call.
}

#[tokio::test]
async fn test_expired_ttl_forces_refetch() {
    let server = MockServer::start().await;
    let studio = studio_for(&server, Duration::zero());

    Mock::given(method("POST"))
        .and(path("/fetch-categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    studio.categories().await;
    studio.categories().await;
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-categories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "cards", "title": "Cards"}])),
        )
        .expect(2)
        .mount(&server)
        .await;

    studio.categories().await;
    assert!(studio.invalidate_cache());
    studio.categories().await;
}

#[tokio::test]
async fn test_unavailable_enumeration_endpoint_is_empty_success() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": true, "message": "Unknown action"})),
        )
        .mount(&server)
        .await;

    let result = studio.categories().await;
    assert_eq!(result, ApiResult::success(vec![]));
}

#[tokio::test]
async fn test_unrecognized_categories_shape_is_empty_success() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(42)))
        .mount(&server)
        .await;

    let result = studio.categories().await;
    assert_eq!(result, ApiResult::success(vec![]));
}

// ── Design listing ──────────────────────────────────────────────────

#[tokio::test]
async fn test_designs_missing_items_is_empty_success() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let result = studio.designs("cards").await;
    assert!(result.is_success());
    assert_eq!(result.data().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_design_without_title_falls_back_to_design_id() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"items": [{"designId": "d9"}]}})),
        )
        .mount(&server)
        .await;

    let result = studio.designs("cards").await;
    let designs = result.data().unwrap();
    assert_eq!(designs[0].design_id, "d9");
    assert_eq!(designs[0].title, "d9");
}

#[tokio::test]
async fn test_empty_category_id_fails_before_any_network_call() {
    let (server, studio) = setup().await;

    let result = studio.designs("   ").await;
    assert_eq!(result.message(), Some("category id is required"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Candidate scanning ──────────────────────────────────────────────

#[tokio::test]
async fn test_scan_confirms_only_candidates_with_designs() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .and(body_partial_json(json!({"categoryId": "y"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                json!({"data": {"items": [{"designId": "d1", "title": "Flyer"}]}}),
            ),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"items": []}})))
        .expect(2)
        .mount(&server)
        .await;

    let candidates = vec!["x".to_owned(), "y".to_owned(), "z".to_owned()];
    let result = studio.scan_categories(&candidates).await;
    let report = result.data().unwrap();

    assert_eq!(report.found, 1);
    assert_eq!(report.categories, vec![category("y", "Category y")]);

    // The confirmed set became the tenant's cached category listing;
    // no fetch-categories mock exists, so a network call would fail.
    let cached = studio.categories().await;
    assert_eq!(cached.data(), Some(&vec![category("y", "Category y")]));
}

#[tokio::test]
async fn test_scan_with_no_confirmations_leaves_cache_untouched() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"items": []}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fetch-categories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "cards", "title": "Cards"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = studio.scan_categories(&["a".to_owned(), "b".to_owned()]).await;
    assert_eq!(result.data().unwrap().found, 0);

    // Nothing cached, so the listing still goes to the wire.
    let listing = studio.categories().await;
    assert_eq!(listing.data(), Some(&vec![category("cards", "Cards")]));
}

#[tokio::test]
async fn test_scan_treats_probe_errors_as_misses() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .and(body_partial_json(json!({"categoryId": "ok"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"items": [{"designId": "d1"}]}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": true, "message": "category not found"})),
        )
        .mount(&server)
        .await;

    let result = studio
        .scan_categories(&["broken".to_owned(), "ok".to_owned()])
        .await;
    let report = result.data().unwrap();
    assert_eq!(report.found, 1);
    assert_eq!(report.categories[0].id, "ok");
}

// ── Connection probe ────────────────────────────────────────────────

#[tokio::test]
async fn test_connection_succeeds_on_category_shaped_rejection() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": true, "message": "category not found"})),
        )
        .mount(&server)
        .await;

    assert!(studio.test_connection().await.is_success());
}

#[tokio::test]
async fn test_connection_fails_on_signature_rejection() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-designs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": true, "message": "invalid signature"})),
        )
        .mount(&server)
        .await;

    let result = studio.test_connection().await;
    assert_eq!(result.message(), Some("invalid signature"));
}

// ── Projects and raster ─────────────────────────────────────────────

#[tokio::test]
async fn test_project_payload_passes_through_unchanged() {
    let (server, studio) = setup().await;

    let payload = json!({"error": false, "data": {"projectId": "p1", "pages": 2}});
    Mock::given(method("POST"))
        .and(path("/fetch-project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let result = studio.project("p1").await;
    assert_eq!(result.data(), Some(&payload));
}

#[tokio::test]
async fn test_non_json_project_body_collapses_to_failure() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-project"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = studio.project("p1").await;
    assert_eq!(result.message(), Some("invalid response from API"));
}

#[tokio::test]
async fn test_create_blank_project_sends_dimensions() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/create-project"))
        .and(body_partial_json(
            json!({"width": 3.5, "height": 2.0, "unit": "in"}),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"projectId": "p-new"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = studio.create_blank_project(3.5, 2.0, "in").await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_raster_bytes_pass_through() {
    let (server, studio) = setup().await;

    let archive = b"PK\x03\x04pages".to_vec();
    Mock::given(method("POST"))
        .and(path("/fetch-raster"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(archive.clone(), "application/zip"))
        .mount(&server)
        .await;

    let result = studio.raster("p1").await;
    assert_eq!(result.data(), Some(&archive));
}

#[tokio::test]
async fn test_raster_html_reply_is_failure_naming_expected_type() {
    let (server, studio) = setup().await;

    Mock::given(method("POST"))
        .and(path("/fetch-raster"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"<html>login</html>".to_vec(), "text/html"),
        )
        .mount(&server)
        .await;

    let result = studio.raster("p1").await;
    let message = result.message().unwrap();
    assert!(
        message.contains("application/zip"),
        "expected content-type complaint, got: {message}"
    );
}

// ── Cache file persistence ──────────────────────────────────────────

#[tokio::test]
async fn test_cache_file_survives_across_studio_instances() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = StudioConfig {
        api_url: server.uri(),
        raster_url: format!("{}/fetch-raster", server.uri()),
        cache_path: Some(dir.path().join("discovery.json")),
        ..StudioConfig::default()
    };

    Mock::given(method("POST"))
        .and(path("/fetch-categories"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "cards", "title": "Cards"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let first = Studio::new(Credentials::new("k1", "s1").unwrap(), &config).unwrap();
    assert!(first.categories().await.is_success());
    drop(first);

    // A new instance loads the spilled cache and never hits the wire.
    let second = Studio::new(Credentials::new("k1", "s1").unwrap(), &config).unwrap();
    let listing = second.categories().await;
    assert_eq!(listing.data(), Some(&vec![category("cards", "Cards")]));
}

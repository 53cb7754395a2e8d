use std::path::Path;

use bizscope_render::GeoPoint;
use bizscope_yelp::YelpError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::report::{write_chart, write_map, MapOptions};

const SEARCH_PATH: &str = "/v3/businesses/search";

fn test_config(server: &MockServer, output_dir: &Path) -> AppConfig {
    AppConfig {
        log_level: "debug".to_string(),
        yelp_api_key: "test-key".to_string(),
        yelp_base_url: format!("{}{SEARCH_PATH}", server.uri()),
        request_timeout_secs: 5,
        user_agent: "bizscope-test/0.1".to_string(),
        rating_threshold: 4.0,
        missing_field_default: FieldDefault::Empty,
        output_dir: output_dir.to_path_buf(),
    }
}

fn search_args(city: &str) -> SearchArgs {
    SearchArgs {
        city: city.to_string(),
        term: None,
        categories: None,
        limit: 50,
        sort_by: SortBy::Rating,
        missing_default: None,
    }
}

async fn mount_businesses(server: &MockServer, businesses: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "businesses": businesses })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_records_normalizes_with_config_default() {
    let server = MockServer::start().await;
    mount_businesses(
        &server,
        json!([
            { "name": "No Location", "rating": 4.2 },
            {
                "name": "Located",
                "rating": 3.8,
                "location": { "address1": "9 Grove St", "city": "Jersey City" },
                "coordinates": { "latitude": 40.72, "longitude": -74.04 }
            }
        ]),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let mut config = test_config(&server, tmp.path());
    config.missing_field_default = FieldDefault::NotAvailable;

    let records = fetch_records(&config, &search_args("Jersey City, NJ"))
        .await
        .expect("search should succeed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].address, "N/A");
    assert_eq!(records[0].city, "N/A");
    assert_eq!(records[1].address, "9 Grove St");
}

#[tokio::test]
async fn fetch_records_cli_default_overrides_config() {
    let server = MockServer::start().await;
    mount_businesses(&server, json!([{ "name": "No Location" }])).await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());
    let mut args = search_args("Jersey City, NJ");
    args.missing_default = Some(FieldDefault::NotAvailable);

    let records = fetch_records(&config, &args).await.unwrap();
    assert_eq!(records[0].address, "N/A");
}

#[tokio::test]
async fn fetch_records_sends_search_options() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("location", "Jersey City, NJ"))
        .and(query_param("categories", "blackowned"))
        .and(query_param("term", "soul food"))
        .and(query_param("limit", "10"))
        .and(query_param("sort_by", "distance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "businesses": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());
    let mut args = search_args("Jersey City, NJ");
    args.categories = Some("blackowned".to_string());
    args.term = Some("soul food".to_string());
    args.limit = 10;
    args.sort_by = SortBy::Distance;

    let records = fetch_records(&config, &args).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn invalid_limit_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());
    let mut args = search_args("Jersey City, NJ");
    args.limit = 75;

    let err = fetch_records(&config, &args).await.unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<YelpError>(),
            Some(YelpError::InvalidQuery { .. })
        ),
        "{err:#}"
    );
}

#[tokio::test]
async fn forbidden_search_stops_pipeline_before_rendering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(2)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());
    let args = search_args("Jersey City, NJ");

    let err = write_chart(&config, &args, None).await.unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<YelpError>(),
            Some(YelpError::Fetch { status_code: 403, .. })
        ),
        "{err:#}"
    );

    let err = write_map(&config, &args, &MapOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<YelpError>(),
        Some(YelpError::Fetch { status_code: 403, .. })
    ));

    let written = std::fs::read_dir(tmp.path()).unwrap().count();
    assert_eq!(written, 0, "no artifact may be written after a failed fetch");
}

#[tokio::test]
async fn chart_writes_svg_named_after_city() {
    let server = MockServer::start().await;
    mount_businesses(
        &server,
        json!([
            { "name": "A", "categories": [{ "title": "Bakery" }] },
            { "name": "B", "categories": [{ "title": "Bakery" }] },
            { "name": "C", "categories": [{ "title": "Cafe" }] }
        ]),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());

    let path = write_chart(&config, &search_args("Jersey City, NJ"), None)
        .await
        .unwrap()
        .expect("chart should be written");

    assert_eq!(path, tmp.path().join("Jersey City_NJ_categories_chart.svg"));
    let svg = std::fs::read_to_string(&path).unwrap();
    assert_eq!(svg.matches("class=\"bar\"").count(), 2);
    assert!(svg.find("Bakery").unwrap() < svg.find("Cafe").unwrap());
}

#[tokio::test]
async fn map_writes_html_with_geocoded_markers_only() {
    let server = MockServer::start().await;
    mount_businesses(
        &server,
        json!([
            {
                "name": "Mapped",
                "rating": 4.9,
                "coordinates": { "latitude": 40.72, "longitude": -74.04 }
            },
            { "name": "Unmapped", "rating": 4.9, "coordinates": null }
        ]),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());
    let out = tmp.path().join("maps");
    let options = MapOptions {
        output_dir: Some(out.clone()),
        ..MapOptions::default()
    };

    let path = write_map(&config, &search_args("Jersey City, NJ"), &options)
        .await
        .unwrap()
        .expect("map should be written");

    assert_eq!(
        path,
        out.join("Jersey City_NJ_black_owned_businesses_map2.html")
    );
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("Mapped"));
    assert!(!html.contains("Unmapped"));
}

#[tokio::test]
async fn map_without_any_coordinates_is_empty_map_error() {
    let server = MockServer::start().await;
    mount_businesses(
        &server,
        json!([{ "name": "A", "rating": 4.9, "coordinates": null, "categories": [{ "title": "Cafe" }] }]),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());

    let err = write_map(&config, &search_args("Jersey City, NJ"), &MapOptions::default())
        .await
        .unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<bizscope_render::RenderError>(),
            Some(bizscope_render::RenderError::EmptyMap)
        ),
        "{err:#}"
    );
}

#[tokio::test]
async fn empty_search_writes_nothing() {
    let server = MockServer::start().await;
    mount_businesses(&server, json!([])).await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());

    let chart = write_chart(&config, &search_args("Nowhere, ZZ"), None)
        .await
        .unwrap();
    assert!(chart.is_none());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn empty_search_with_center_writes_markerless_map() {
    let server = MockServer::start().await;
    mount_businesses(&server, json!([])).await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());
    let options = MapOptions {
        center: Some(GeoPoint::new(40.7282, -74.0776)),
        ..MapOptions::default()
    };

    let path = write_map(&config, &search_args("Jersey City, NJ"), &options)
        .await
        .unwrap()
        .expect("map should be written around the supplied center");

    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("setView([40.728200, -74.077600], 13)"));
    assert!(html.contains("const markers = [];"));
}

#[tokio::test]
async fn empty_search_without_center_writes_no_map() {
    let server = MockServer::start().await;
    mount_businesses(&server, json!([])).await;

    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&server, tmp.path());

    let map = write_map(&config, &search_args("Jersey City, NJ"), &MapOptions::default())
        .await
        .unwrap();
    assert!(map.is_none());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use nutrition_insights::api::build_router;
use nutrition_insights::config::ServiceConfig;
use nutrition_insights::dataset::{DatasetSource, ReloadPolicy};
use nutrition_insights::server::NutritionApiServer;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

const FIXTURE: &str = "\
Diet_type,Recipe_name,Cuisine_type,Protein(g),Carbs(g),Fat(g),Extraction_day
vegan,A,asian,100,50,10,2022-10-16
vegan,B,american,80,60,5,2022-10-16
keto,C,french,10,5,50,2022-10-16
";

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}

fn app_for(file: &NamedTempFile) -> Router {
    build_router(Arc::new(DatasetSource::new(file.path(), ReloadPolicy::EveryRequest)))
}

fn app_without_dataset() -> Router {
    build_router(Arc::new(DatasetSource::new(
        "this/path/does/not/exist/All_Diets.csv",
        ReloadPolicy::EveryRequest,
    )))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let response = app.oneshot(request).await.expect("execute request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_never_needs_dataset() {
    let (status, body) = get_json(app_without_dataset(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "Nutritional Insights API is running");
}

#[tokio::test]
async fn test_nutrition_summary() {
    let file = write_fixture(FIXTURE);
    let (status, body) = get_json(app_for(&file), "/api/nutrition/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["total_records"], 3);
    assert_eq!(body["diet_types"], 2);

    let data = body["data"].as_array().expect("data array");
    let vegan = data.iter().find(|d| d["Diet_type"] == "vegan").expect("vegan group");
    assert_eq!(vegan["Protein"].as_f64(), Some(90.0));
    assert_eq!(vegan["Carbs"].as_f64(), Some(55.0));
    assert_eq!(vegan["Fat"].as_f64(), Some(7.5));
    assert_eq!(vegan["recipes"], 2);

    let total: u64 = data.iter().filter_map(|d| d["recipes"].as_u64()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_top_protein_default_and_limit() {
    let file = write_fixture(FIXTURE);

    let (status, body) = get_json(app_for(&file), "/api/recipes/top-protein").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"][0]["recipe"], "A");
    assert_eq!(body["data"][0]["protein"].as_f64(), Some(100.0));
    assert_eq!(body["data"][0]["carbs"].as_f64(), Some(50.0));

    let (_, body) = get_json(app_for(&file), "/api/recipes/top-protein?limit=2").await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][1]["recipe"], "B");

    let (status, body) = get_json(app_for(&file), "/api/recipes/top-protein?limit=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let (status, body) = get_json(app_for(&file), "/api/recipes/top-protein?limit=-4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_non_integer_limit_is_a_client_error() {
    let file = write_fixture(FIXTURE);
    let (status, body) = get_json(app_for(&file), "/api/recipes/top-protein?limit=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Invalid query parameters"));
}

#[tokio::test]
async fn test_recipe_statistics_with_and_without_filter() {
    let file = write_fixture(FIXTURE);

    let (status, body) = get_json(app_for(&file), "/api/recipes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statistics"]["total_recipes"], 3);
    assert_eq!(body["statistics"]["avg_protein"].as_f64(), Some(63.33));

    let (_, body) = get_json(app_for(&file), "/api/recipes?diet_type=KETO").await;
    assert_eq!(body["statistics"]["total_recipes"], 1);
    assert_eq!(body["statistics"]["avg_fat"].as_f64(), Some(50.0));
}

#[tokio::test]
async fn test_recipe_statistics_no_matching_data() {
    let file = write_fixture(FIXTURE);
    let (status, body) = get_json(app_for(&file), "/api/recipes?diet_type=carnivore").await;

    assert_eq!(status, StatusCode::OK);
    let stats = &body["statistics"];
    assert_eq!(stats["total_recipes"], 0);
    assert!(stats["avg_protein"].is_null());
    assert!(stats["avg_carbs"].is_null());
    assert!(stats["avg_fat"].is_null());
}

#[tokio::test]
async fn test_clusters_boundary() {
    let file = write_fixture(FIXTURE);
    let (status, body) = get_json(app_for(&file), "/api/clusters").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clusters_identified"], 3);
    // vegan's 90g mean protein sits on the threshold, not above it
    assert_eq!(body["high_protein_cluster"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["high_carb_cluster"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["balanced_cluster"], serde_json::json!(["keto", "vegan"]));
}

#[tokio::test]
async fn test_paginated_listing_passes_rows_through() {
    let file = write_fixture(FIXTURE);
    let (status, body) = get_json(app_for(&file), "/api/nutrition/all?page=2&per_page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 2);
    assert_eq!(body["total_records"], 3);
    assert_eq!(body["total_pages"], 2);

    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["Recipe_name"], "C");
    assert_eq!(data[0]["Cuisine_type"], "french");
    assert_eq!(data[0]["Extraction_day"], "2022-10-16");
}

#[tokio::test]
async fn test_paginated_listing_defaults_and_out_of_range() {
    let file = write_fixture(FIXTURE);

    let (_, body) = get_json(app_for(&file), "/api/nutrition/all").await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 50);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));

    let (status, body) = get_json(app_for(&file), "/api/nutrition/all?page=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_invalid_pagination_is_rejected() {
    let file = write_fixture(FIXTURE);
    for uri in [
        "/api/nutrition/all?per_page=0",
        "/api/nutrition/all?per_page=-10",
        "/api/nutrition/all?page=0",
        "/api/nutrition/all?page=two",
    ] {
        let (status, body) = get_json(app_for(&file), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_missing_dataset_is_a_server_error_everywhere() {
    for uri in [
        "/api/nutrition/summary",
        "/api/recipes/top-protein",
        "/api/recipes",
        "/api/clusters",
        "/api/nutrition/all",
    ] {
        let (status, body) = get_json(app_without_dataset(), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body["error"], "Failed to load data", "{}", uri);
    }
}

#[tokio::test]
async fn test_dataset_missing_columns_is_a_server_error() {
    let file = write_fixture("Diet_type,Recipe_name,Protein(g)\nvegan,A,10\n");
    let (status, body) = get_json(app_for(&file), "/api/nutrition/summary").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to load data");
}

#[tokio::test]
async fn test_each_request_sees_a_fresh_dataset() {
    let mut file = write_fixture(FIXTURE);
    let app = app_for(&file);

    let (_, before) = get_json(app.clone(), "/api/nutrition/summary").await;
    assert_eq!(before["total_records"], 3);

    writeln!(file, "paleo,D,american,30,10,20,2022-10-17").expect("append row");
    file.flush().expect("flush");

    let (_, after) = get_json(app, "/api/nutrition/summary").await;
    assert_eq!(after["total_records"], 4);
    assert_eq!(after["diet_types"], 3);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let file = write_fixture(FIXTURE);
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://frontend.example")
        .body(Body::empty())
        .expect("build request");
    let response = app_for(&file).oneshot(request).await.expect("execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_server_router_uses_configured_dataset() {
    let file = write_fixture(FIXTURE);
    let server = NutritionApiServer::new(ServiceConfig::with_dataset_path(file.path()));
    let (status, body) = get_json(server.router(), "/api/clusters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, _) = get_json(app_without_dataset(), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

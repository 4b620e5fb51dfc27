//! Static provider rendered end to end.

use std::sync::Arc;

use data_providers::{StaticProvider, StaticProviderError, OBJECT_IDS_PARAM};
use featureserver_protocol::{
    DataProvider, LayerQueryRequest, OutputFormat, ProviderRegistry, Query, QueryResult, Renderer,
};
use serde_json::json;
use test_utils::{demo_provider_path, fixtures, temp_test_dir, write_test_file};

const BASE_URL: &str = "http://localhost:1337";

fn provider_from_fixture() -> StaticProvider {
    let dir = temp_test_dir();
    let path = write_test_file(dir.path(), "demo.yaml", fixtures::DEMO_PROVIDER_YAML);
    StaticProvider::load(&path, BASE_URL, "demo").unwrap()
}

#[test]
fn test_load_bundled_demo_provider() {
    let provider = StaticProvider::load(demo_provider_path(), BASE_URL, "demo").unwrap();
    assert!(!provider.service_ids().unwrap().is_empty());
}

#[test]
fn test_load_missing_file() {
    let dir = temp_test_dir();
    let err = StaticProvider::load(dir.path().join("nope.yaml"), BASE_URL, "demo").unwrap_err();
    assert!(matches!(err, StaticProviderError::Io { .. }));
}

#[test]
fn test_catalog_preserves_file_order() {
    let renderer = Renderer::with_builtin_templates().unwrap();
    let provider = provider_from_fixture();

    let catalog = renderer.services(OutputFormat::Json, &provider).unwrap();
    let names: Vec<_> = catalog.as_structured().unwrap()["services"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["cities", "rivers"]);

    let service = renderer
        .feature_service(OutputFormat::Json, &provider, "cities")
        .unwrap();
    assert_eq!(
        service.as_structured().unwrap()["layers"],
        json!([{"id": 0, "name": "Cities"}, {"id": 1, "name": "Capitals"}])
    );
}

#[test]
fn test_layer_markup_lists_yaml_fields() {
    let renderer = Renderer::with_builtin_templates().unwrap();
    let provider = provider_from_fixture();

    let page = renderer
        .feature_service_layer(OutputFormat::Html, &provider, "cities", 0)
        .unwrap();
    let page = page.as_markup().unwrap();

    assert!(page.contains("<b>Display Field: </b>NAME<br/>"));
    assert!(page.contains("alias: City Name, nullable: true, editable: false"));
}

#[tokio::test]
async fn test_query_modes() {
    let renderer = Renderer::with_builtin_templates().unwrap();
    let provider = provider_from_fixture();

    let count = renderer
        .feature_service_layer_query(
            OutputFormat::Json,
            &provider,
            "cities",
            0,
            &LayerQueryRequest::default().count_only(),
        )
        .await
        .unwrap();
    assert_eq!(serde_json::to_value(&count).unwrap(), json!({"count": 2}));

    let ids = renderer
        .feature_service_layer_query(
            OutputFormat::Json,
            &provider,
            "cities",
            0,
            &LayerQueryRequest::default().ids_only(),
        )
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&ids).unwrap(),
        json!({"objectIdFieldName": "OBJECTID", "objectIds": [1, 2]})
    );
}

#[tokio::test]
async fn test_object_ids_filter() {
    let provider = provider_from_fixture();
    let query = Query::new().with_param(OBJECT_IDS_PARAM, "2");

    let features = provider.features_for_query("cities", 0, &query).await.unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].attribute("NAME"), Some(&json!("New York")));

    let err = provider
        .count_for_query("cities", 0, &Query::new().with_param(OBJECT_IDS_PARAM, "x"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid objectIds filter 'x'");
}

#[tokio::test]
async fn test_web_mercator_query() {
    let renderer = Renderer::with_builtin_templates().unwrap();
    let provider = provider_from_fixture();

    let result = renderer
        .feature_service_layer_query(
            OutputFormat::Json,
            &provider,
            "cities",
            0,
            &LayerQueryRequest::default().with_out_sr(102100),
        )
        .await
        .unwrap();

    let QueryResult::Features(feature_set) = result else {
        panic!("expected a feature set");
    };
    let london = &feature_set["features"][0];
    assert_eq!(london["attributes"]["NAME"], json!("London"));
    test_utils::assert_approx_eq!(london["geometry"]["x"].as_f64().unwrap(), -14_226.63, 0.01);
    assert_eq!(feature_set["spatialReference"]["wkid"], json!(102100));
}

#[test]
fn test_registry_landing_page() {
    let renderer = Renderer::with_builtin_templates().unwrap();
    let mut registry = ProviderRegistry::new();
    registry.register("demo", Arc::new(provider_from_fixture()));

    let page = renderer.data_providers_html(&registry);
    assert!(page.contains("<li><a href='http://localhost:1337/demo/rest/services'>Demo</a></li>"));
}

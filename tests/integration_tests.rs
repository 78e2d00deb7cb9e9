//! Integration tests for the product search pipeline

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use product_search::api::{create_router, AppState};
use product_search::catalog::Catalog;
use product_search::config::SearchConfig;
use product_search::error::SearchError;
use product_search::server::McpServer;
use product_search::tools::register_all_tools;
use product_search::types::ProductQuery;

const CATALOG: &str = r#"
{"product_id": "p1", "title": "Crimson Party Dress", "color": "Crimson", "product_type": "Dress", "occasion": "Party", "description": "Backless satin", "gender": "Women", "brand": "Acme", "category": "Apparel", "rating": 4.5, "final_price": "$49.99"}
{"product_id": "p2", "title": "Office Shirt", "color": "Blue", "product_type": "Shirt", "occasion": "Formal", "description": "Slim fit cotton", "gender": "Men", "brand": "Zenith", "category": "Apparel"}
{"product_id": "p3", "title": "Linen Shirt", "color": "Red", "product_type": "Shirt", "occasion": "Casual", "description": "Relaxed linen", "gender": "Men Women", "brand": "Acme"}
{"product_id": "p4", "title": "Bridal Gown", "color": "Maroon", "product_type": "Gown", "occasion": "Wedding", "description": "Lace sleeves", "gender": "Women", "discount": "15 %"}
{"product_id": "p5", "title": "Chinos", "color": "Olive", "product_type": "Trousers", "occasion": "Casual", "description": "Stretch twill", "gender": "Men"}
"#;

fn setup_config(catalog: &str, thesaurus: Option<&str>) -> (SearchConfig, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("products.jsonl");
    fs::write(&catalog_path, catalog).unwrap();

    let thesaurus_path = thesaurus.map(|content| {
        let path = dir.path().join("thesaurus.txt");
        fs::write(&path, content).unwrap();
        path
    });

    let config = SearchConfig {
        catalog_path,
        thesaurus_path,
        ..SearchConfig::default()
    };
    (config, dir)
}

fn setup_catalog() -> (Arc<Catalog>, TempDir) {
    let (config, dir) = setup_config(CATALOG, None);
    let (catalog, report) = Catalog::from_config(&config).unwrap();
    assert_eq!(report.products, 5);
    assert_eq!(report.failed, 0);
    (Arc::new(catalog), dir)
}

fn red_dress_query() -> ProductQuery {
    ProductQuery::new()
        .with_type("dress")
        .with_color("red")
        .with_gender("female")
}

#[test]
fn test_load_and_ingest_from_config() {
    let (catalog, _dir) = setup_catalog();

    assert_eq!(catalog.len(), 5);
    // Synonym expansion adds chunks for crimson and maroon products
    assert!(catalog.indexed_documents() > 5);
    assert!(catalog.file_path().unwrap().ends_with("products.jsonl"));
}

#[test]
fn test_end_to_end_search_ranks_synonym_matches() {
    let (catalog, _dir) = setup_catalog();

    let outcome = catalog.product_search(&red_dress_query()).unwrap();

    // Crimson dress and maroon gown both match "red dress" through synonyms
    assert_eq!(&outcome.product_ids[..2], &["p1".to_string(), "p4".to_string()]);
    // Menswear is filtered out by the index
    assert!(!outcome.product_ids.contains(&"p2".to_string()));
    assert!(!outcome.product_ids.contains(&"p5".to_string()));

    assert!(outcome
        .results
        .windows(2)
        .all(|w| w[0].total_weight >= w[1].total_weight));
    assert!(outcome.results.iter().all(|r| r.prod_type.is_some()));
    assert!((outcome.results[0].overall_score - 100.0).abs() < 1e-6);
}

#[test]
fn test_search_without_type_keeps_color_matches() {
    let (catalog, _dir) = setup_catalog();

    let outcome = catalog
        .product_search(&ProductQuery::new().with_color("red").with_occasion("casual"))
        .unwrap();

    // Without a gender only unisex products are eligible
    assert_eq!(outcome.product_ids, vec!["p3".to_string()]);
    assert!(outcome.results[0].prod_type.is_none());
    assert!(outcome.results[0].prod_color.is_some());
}

#[test]
fn test_custom_thesaurus_file() {
    let catalog_text = r#"{"product_id": "k1", "color": "Blue", "product_type": "Kurta", "occasion": "Casual", "gender": "men women"}"#;
    let thesaurus = "# regional garments\nkurta, kameez => tunic\n";
    let (config, _dir) = setup_config(catalog_text, Some(thesaurus));

    let (catalog, _) = Catalog::from_config(&config).unwrap();
    assert_eq!(catalog.thesaurus().len(), 1);
    assert_eq!(catalog.thesaurus().render(), "kurta, kameez => tunic\n");

    let outcome = catalog
        .product_search(&ProductQuery::new().with_type("tunic"))
        .unwrap();
    assert_eq!(outcome.product_ids, vec!["k1".to_string()]);
}

#[test]
fn test_malformed_thesaurus_is_an_error() {
    let (config, _dir) = setup_config(CATALOG, Some("red, crimson\n => dress\n"));
    match Catalog::from_config(&config) {
        Err(SearchError::ThesaurusParse { line, .. }) => assert_eq!(line, 2),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("expected a parse error"),
    }
}

#[test]
fn test_malformed_catalog_reports_line() {
    let (config, _dir) = setup_config("{\"product_id\": \"a\"}\n\n{broken\n", None);
    match Catalog::from_config(&config) {
        Err(SearchError::CatalogParse { line, .. }) => assert_eq!(line, 3),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("expected a parse error"),
    }
}

#[test]
fn test_missing_catalog_starts_empty() {
    let config = SearchConfig {
        catalog_path: PathBuf::from("/nonexistent/products.jsonl"),
        ..SearchConfig::default()
    };
    let (catalog, report) = Catalog::from_config(&config).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(report.documents, 0);
    assert_eq!(report.batches, 0);
}

#[test]
fn test_duplicate_ids_rejected() {
    let duplicated = format!("{CATALOG}\n{{\"product_id\": \"p1\"}}\n");
    let (config, _dir) = setup_config(&duplicated, None);
    assert!(matches!(
        Catalog::from_config(&config),
        Err(SearchError::DuplicateProduct(id)) if id == "p1"
    ));
}

#[test]
fn test_concurrent_searches() {
    let (catalog, _dir) = setup_catalog();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || catalog.product_search(&red_dress_query()).unwrap())
        })
        .collect();

    let first = catalog.product_search(&red_dress_query()).unwrap();
    for handle in handles {
        let outcome = handle.join().unwrap();
        assert_eq!(outcome.product_ids, first.product_ids);
    }
}

#[test]
fn test_mcp_search_products_tool() {
    let (catalog, _dir) = setup_catalog();
    let mut server = McpServer::new();
    register_all_tools(&mut server, catalog);
    assert_eq!(server.tool_count(), 4);

    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {
            "name": "search_products",
            "arguments": {"product_type": "dress", "product_color": "red", "gender": "female"}
        }
    });
    let response = serde_json::to_value(server.handle_request(&request.to_string()).unwrap()).unwrap();
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    let body: Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["product_ids"][0], "p1");
}

#[test]
fn test_mcp_search_uses_catalog_top_n() {
    let (config, _dir) = setup_config(CATALOG, None);
    let config = SearchConfig { top_n: 1, ..config };
    let (catalog, _) = Catalog::from_config(&config).unwrap();
    let catalog = Arc::new(catalog);
    assert_eq!(catalog.top_n(), 1);

    let mut server = McpServer::new();
    register_all_tools(&mut server, catalog.clone());

    let call = |arguments: Value| {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "search_products", "arguments": arguments}
        });
        let response =
            serde_json::to_value(server.handle_request(&request.to_string()).unwrap()).unwrap();
        let body: Value =
            serde_json::from_str(response["result"]["content"][0]["text"].as_str().unwrap())
                .unwrap();
        body["product_ids"].as_array().unwrap().len()
    };

    // Several red products match; the configured single hit caps the results
    assert_eq!(call(json!({"product_color": "red", "gender": "female"})), 1);
    assert!(call(json!({"product_color": "red", "gender": "female", "top_n": 10})) > 1);
    assert_eq!(
        catalog
            .product_search(&ProductQuery::new().with_color("red").with_gender("female"))
            .unwrap()
            .product_ids
            .len(),
        1
    );
}

#[test]
fn test_mcp_synonym_lookup() {
    let (catalog, _dir) = setup_catalog();
    let mut server = McpServer::new();
    register_all_tools(&mut server, catalog);

    let request = json!({
        "jsonrpc": "2.0",
        "id": 8,
        "method": "tools/call",
        "params": {"name": "export_thesaurus", "arguments": {"term": "maroon"}}
    });
    let response = serde_json::to_value(server.handle_request(&request.to_string()).unwrap()).unwrap();
    let body: Value =
        serde_json::from_str(response["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(body["synonyms"][0], "maroon");
    assert!(body["synonyms"].as_array().unwrap().contains(&json!("red")));
}

#[test]
fn test_mcp_tool_errors() {
    let (catalog, _dir) = setup_catalog();
    let mut server = McpServer::new();
    register_all_tools(&mut server, catalog);

    let missing = json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {"name": "get_product", "arguments": {"product_id": "nope"}}
    });
    let response = server.handle_request(&missing.to_string()).unwrap();
    assert_eq!(response.error_code(), Some(-32603));

    let preprocess = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "preprocess_text", "arguments": {"text": "The Crimson dress for women"}}
    });
    let response = serde_json::to_value(server.handle_request(&preprocess.to_string()).unwrap()).unwrap();
    let body: Value =
        serde_json::from_str(response["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(body["gender"], "female");
    assert!(body["preprocessed"].as_str().unwrap().contains("crimson, red"));
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_http_search_and_products() {
    let (catalog, _dir) = setup_catalog();
    let state = Arc::new(AppState::new(catalog));

    let (status, body) = get_json(
        create_router(state.clone()),
        "/api/search?type=dress&color=red&gender=female",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["product_ids"][0], "p1");

    let (status, body) = get_json(create_router(state.clone()), "/api/products?limit=2&offset=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["data"][0]["product_id"], "p2");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = get_json(create_router(state.clone()), "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["products"], 5);
    // The stats request itself is counted before the handler runs
    assert_eq!(body["data"]["requests_served"], 3);
}

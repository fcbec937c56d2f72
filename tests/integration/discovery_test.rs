//! File and recipe discovery against a mock gateway.

use httpmock::prelude::*;
use serde_json::json;

use ifcpipeline_core::types::ExtensionFilter;

use crate::helpers::{self, TEST_API_KEY, TestGateway};

#[tokio::test]
async fn test_list_files_filters_by_extension_in_order() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/list_directories")
                .header("x-api-key", TEST_API_KEY);
            then.status(200).json_body(json!({
                "uploads": ["b.ifc", "rules.ids", "a.IFC"],
                "output": {"csv": ["table.csv"], "ifc": ["patched.ifc"]}
            }));
        })
        .await;

    let options = gw
        .client
        .discovery()
        .list_files(&ExtensionFilter::parse(".ifc"))
        .await;

    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["uploads/b.ifc", "uploads/a.IFC", "output/ifc/patched.ifc"]
    );
    assert!(options.iter().all(|o| o.label == o.value));
}

#[tokio::test]
async fn test_list_files_failure_is_placeholder() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.path("/list_directories");
            then.status(500).body("boom");
        })
        .await;

    let options = gw.client.discovery().list_files(&ExtensionFilter::any()).await;
    assert_eq!(options.len(), 1);
    assert!(options[0].is_placeholder());
    assert_eq!(options[0].label, "Failed to load files");
}

#[tokio::test]
async fn test_list_recipes_builtins_first() {
    let gw = TestGateway::start().await;
    let listing = gw
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/patch/recipes/list")
                .json_body(json!({"include_builtin": true, "include_custom": true}));
            then.status(200).json_body(json!({
                "recipes": [
                    {"name": "B1", "description": "second", "is_custom": false},
                    {"name": "Z1", "description": "custom", "is_custom": true,
                     "parameters": [{"name": "depth", "type": "int"}]},
                    {"name": "A1", "description": "first", "is_custom": false}
                ]
            }));
        })
        .await;

    let options = gw.client.discovery().list_recipes().await;

    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["A1", "B1", "Z1 [Custom] (1 param)"]);
    assert_eq!(options[2].value, "Z1");
    listing.assert_async().await;
}

#[tokio::test]
async fn test_list_recipes_transport_failure_is_placeholder() {
    let client = helpers::client_for("http://127.0.0.1:9", TEST_API_KEY);
    let options = client.discovery().list_recipes().await;
    assert_eq!(options.len(), 1);
    assert!(options[0].is_placeholder());
}

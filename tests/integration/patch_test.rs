//! Patch execution with recipe metadata lookup and batches.

use httpmock::prelude::*;
use serde_json::{Value, json};

use ifcpipeline_client::batch::BatchRunner;
use ifcpipeline_client::operations::patch::{PatchRequest, RawRecipeArguments};
use ifcpipeline_client::recipes::RecipeCatalog;
use ifcpipeline_core::error::ErrorKind;

use crate::helpers::{self, TestGateway};

fn recipes_listing() -> Value {
    json!({
        "recipes": [
            {"name": "ExtractElements", "description": "Extract", "is_custom": false},
            {"name": "CleanupScript", "description": "Ours", "is_custom": true}
        ]
    })
}

fn request(recipe: &str, arguments: RawRecipeArguments) -> PatchRequest {
    PatchRequest {
        input_file: "/uploads/model.ifc".to_string(),
        output_file: "/output/ifc/patched.ifc".to_string(),
        recipe: recipe.to_string(),
        arguments,
        use_custom: None,
    }
}

#[tokio::test]
async fn test_extract_elements_body() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST).path("/patch/recipes/list");
            then.status(200).json_body(recipes_listing());
        })
        .await;
    let execute = gw
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/patch/execute").json_body(json!({
                "input_file": "/uploads/model.ifc",
                "output_file": "/output/ifc/patched.ifc",
                "recipe": "ExtractElements",
                "use_custom": false,
                "arguments": ["IfcWall", true]
            }));
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let mut catalog = RecipeCatalog::new();
    let args = RawRecipeArguments {
        query: Some("IfcWall".to_string()),
        assume_unique_by_name: Some(true),
        ..Default::default()
    };
    gw.client
        .execute_patch(
            &mut catalog,
            request("ExtractElements", args),
            helpers::fast_polling(30),
        )
        .await
        .expect("execute");

    execute.assert_async().await;
}

#[tokio::test]
async fn test_custom_flag_from_catalog_and_metadata_fetched_once() {
    let gw = TestGateway::start().await;
    let listing = gw
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/patch/recipes/list");
            then.status(200).json_body(recipes_listing());
        })
        .await;
    let execute = gw
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/patch/execute").json_body(json!({
                "input_file": "/uploads/model.ifc",
                "output_file": "/output/ifc/patched.ifc",
                "recipe": "CleanupScript",
                "use_custom": true,
                "arguments": ["walls", "slabs"]
            }));
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let mut catalog = RecipeCatalog::new();
    let args = RawRecipeArguments {
        values: vec!["walls".to_string(), "".to_string(), "slabs".to_string()],
        ..Default::default()
    };
    for _ in 0..2 {
        gw.client
            .execute_patch(
                &mut catalog,
                request("CleanupScript", args.clone()),
                helpers::fast_polling(30),
            )
            .await
            .expect("execute");
    }

    listing.assert_hits_async(1).await;
    execute.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_execution_attempted_when_metadata_unavailable() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST).path("/patch/recipes/list");
            then.status(503).body("recipes service down");
        })
        .await;
    let execute = gw
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/patch/execute").json_body(json!({
                "input_file": "/uploads/model.ifc",
                "output_file": "/output/ifc/patched.ifc",
                "recipe": "ConvertLengthUnit",
                "use_custom": false,
                "arguments": ["MILLIMETRE"]
            }));
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let mut catalog = RecipeCatalog::new();
    let args = RawRecipeArguments {
        unit: Some("MILLIMETRE".to_string()),
        ..Default::default()
    };
    gw.client
        .execute_patch(
            &mut catalog,
            request("ConvertLengthUnit", args),
            helpers::fast_polling(30),
        )
        .await
        .expect("execute");

    execute.assert_async().await;
}

#[tokio::test]
async fn test_batch_continue_on_fail() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST).path("/patch/recipes/list");
            then.status(200).json_body(recipes_listing());
        })
        .await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/patch/execute")
                .body_contains("\"input_file\":\"/uploads/bad.ifc\"");
            then.status(400).json_body(json!({"detail": "Input file not found"}));
        })
        .await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/patch/execute")
                .body_contains("\"input_file\":\"/uploads/model.ifc\"");
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let mut bad = request("CleanupScript", RawRecipeArguments::default());
    bad.input_file = "/uploads/bad.ifc".to_string();
    let items = vec![
        request("CleanupScript", RawRecipeArguments::default()),
        bad,
        request("CleanupScript", RawRecipeArguments::default()),
    ];

    let mut catalog = RecipeCatalog::new();
    let mut batch = BatchRunner::new(true);
    for item in items {
        let result = match gw
            .client
            .execute_patch(&mut catalog, item, helpers::fast_polling(30))
            .await
        {
            Ok(outcome) => outcome.into_value(),
            Err(e) => Err(e),
        };
        batch.record(result).expect("continue on fail");
    }
    let report = batch.finish();

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.results[0], json!({"success": true}));
    let error = report.results[1]["error"].as_str().expect("error message");
    assert!(error.contains("Input file not found"));

    let mut strict = BatchRunner::new(false);
    let err = strict
        .record(Err(ifcpipeline_core::error::AppError::remote(400, "boom")))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Remote);
}

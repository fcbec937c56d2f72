//! Upload, download, and plain request behavior.

use httpmock::prelude::*;
use serde_json::json;

use ifcpipeline_client::JobOutcome;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::files::{DownloadFromUrlRequest, FileType};
use ifcpipeline_core::error::ErrorKind;

use crate::helpers::{self, TEST_API_KEY, TestGateway};

#[tokio::test]
async fn test_health_sends_api_key() {
    let gw = TestGateway::start().await;
    let health = gw
        .server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/health")
                .header("x-api-key", TEST_API_KEY);
            then.status(200).json_body(json!({"status": "healthy"}));
        })
        .await;

    let response = gw.client.health().await.expect("health");
    assert_eq!(response["status"], json!("healthy"));
    health.assert_async().await;
}

#[tokio::test]
async fn test_wrong_key_is_api_error() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.path("/health");
            then.status(403).json_body(json!({"detail": "Could not validate API key"}));
        })
        .await;

    let client = helpers::client_for(&gw.server.base_url(), "wrong-key-0000");
    let err = client.health().await.unwrap_err();

    assert!(err.is_api_error());
    assert_eq!(err.status_code, Some(403));
    assert!(!err.to_string().contains("wrong-key-0000"));
}

#[tokio::test]
async fn test_unreachable_gateway_is_transport_error() {
    let client = helpers::client_for("http://127.0.0.1:9", TEST_API_KEY);
    let err = client.list_directories().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Transport);
    assert!(err.is_api_error());
}

#[tokio::test]
async fn test_upload_sends_single_file_part() {
    let gw = TestGateway::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("model.ifc");
    tokio::fs::write(&path, "ISO-10303-21;\nHEADER;\nENDSEC;\n")
        .await
        .expect("write");

    let upload = gw
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/upload/ifc")
                .header("x-api-key", TEST_API_KEY)
                .body_contains("name=\"file\"")
                .body_contains("filename=\"model.ifc\"")
                .body_contains("application/x-step")
                .body_contains("ISO-10303-21;");
            then.status(200)
                .json_body(json!({"filename": "model.ifc", "path": "/uploads/model.ifc"}));
        })
        .await;

    let response = gw.client.upload(&path, FileType::Ifc).await.expect("upload");
    assert_eq!(response["path"], json!("/uploads/model.ifc"));
    upload.assert_async().await;
}

#[tokio::test]
async fn test_download_is_byte_exact() {
    let gw = TestGateway::start().await;
    let payload: Vec<u8> = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0x9f, 0x92, 0x96, 0xff, 0xfe];

    let link = gw
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/create_download_link")
                .json_body(json!({"file_path": "/output/ifc/patched.ifc"}));
            then.status(200).json_body(json!({"token": "tok-123"}));
        })
        .await;
    let download = gw
        .server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/download/tok-123")
                .header("x-api-key", TEST_API_KEY);
            then.status(200)
                .header("content-type", "application/octet-stream")
                .body(payload.clone());
        })
        .await;

    let file = gw
        .client
        .download_file("/output/ifc/patched.ifc")
        .await
        .expect("download");

    assert_eq!(file.file_name, "patched.ifc");
    assert_eq!(file.mime_type, "application/x-step");
    assert_eq!(file.bytes.as_ref(), payload.as_slice());
    link.assert_async().await;
    download.assert_async().await;
}

#[tokio::test]
async fn test_download_link_without_token() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.path("/create_download_link");
            then.status(200).json_body(json!({"message": "ok"}));
        })
        .await;

    let err = gw.client.download_file("/output/x.csv").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Remote);
}

#[tokio::test]
async fn test_download_from_url_inline_result() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/download-from-url")
                .json_body(json!({"url": "https://example.com/model.ifc"}));
            then.status(200)
                .json_body(json!({"success": true, "file_path": "/uploads/model.ifc"}));
        })
        .await;

    let op = Operation::DownloadFromUrl(DownloadFromUrlRequest {
        url: "https://example.com/model.ifc".to_string(),
    });
    let outcome = gw
        .client
        .run(&op, helpers::fast_polling(30))
        .await
        .expect("outcome");

    assert_eq!(
        outcome,
        JobOutcome::Completed {
            response: json!({"success": true, "file_path": "/uploads/model.ifc"})
        }
    );
}

#[tokio::test]
async fn test_get_json_result() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(GET).path("/ifc2json/model.json");
            then.status(200).json_body(json!([{"type": "IfcProject"}]));
        })
        .await;

    let document = gw.client.get_json("model.json").await.expect("json");
    assert_eq!(document[0]["type"], json!("IfcProject"));
}

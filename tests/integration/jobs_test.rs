//! Job submission and polling over HTTP.

use httpmock::prelude::*;
use serde_json::json;

use ifcpipeline_client::JobOutcome;
use ifcpipeline_client::operations::Operation;
use ifcpipeline_client::operations::convert::{ConvertOptions, ConvertRequest};
use ifcpipeline_client::operations::qto::QuantityTakeoffRequest;
use ifcpipeline_core::error::ErrorKind;
use ifcpipeline_core::types::JobStatus;

use crate::helpers::{self, TEST_API_KEY, TestGateway};

fn convert_op() -> Operation {
    Operation::Convert(ConvertRequest {
        input_filename: "/uploads/model.ifc".to_string(),
        output_filename: "/output/glb/model.glb".to_string(),
        options: ConvertOptions {
            weld_vertices: Some(true),
            ..Default::default()
        },
    })
}

#[tokio::test]
async fn test_submitted_job_polled_until_success() {
    let gw = TestGateway::start().await;
    let submit = gw
        .server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/ifcconvert")
                .header("x-api-key", TEST_API_KEY)
                .json_body(json!({
                    "input_filename": "/uploads/model.ifc",
                    "output_filename": "/output/glb/model.glb",
                    "weld_vertices": true
                }));
            then.status(200).json_body(json!({"job_id": "conv-17"}));
        })
        .await;
    let status = gw
        .server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/jobs/conv-17/status")
                .header("x-api-key", TEST_API_KEY);
            then.status(200).json_body(json!({
                "status": "finished",
                "result": {"success": true, "output_path": "/output/glb/model.glb"}
            }));
        })
        .await;

    let outcome = gw
        .client
        .run(&convert_op(), helpers::fast_polling(30))
        .await
        .expect("outcome");

    match outcome {
        JobOutcome::Succeeded { job_id, result, .. } => {
            assert_eq!(job_id, "conv-17");
            assert_eq!(result["output_path"], json!("/output/glb/model.glb"));
        }
        other => panic!("expected success, got {other:?}"),
    }
    submit.assert_async().await;
    status.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_running_job_times_out_without_failing() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST).path("/ifcconvert");
            then.status(200).json_body(json!({"job_id": "slow-1"}));
        })
        .await;
    let status = gw
        .server
        .mock_async(|when, then| {
            when.method(GET).path("/jobs/slow-1/status");
            then.status(200).json_body(json!({"status": "started"}));
        })
        .await;

    let outcome = gw
        .client
        .run(&convert_op(), helpers::fast_polling(2))
        .await
        .expect("outcome");

    match &outcome {
        JobOutcome::TimedOut {
            job_id,
            last_status,
            ..
        } => {
            assert_eq!(job_id, "slow-1");
            assert_eq!(*last_status, Some(JobStatus::Running));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    status.assert_hits_async(1).await;
    assert_eq!(outcome.into_value().unwrap_err().kind, ErrorKind::Timeout);
}

#[tokio::test]
async fn test_failed_job_is_surfaced() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST).path("/calculate-qtos");
            then.status(200).json_body(json!({"job_id": "qto-3"}));
        })
        .await;
    gw.server
        .mock_async(|when, then| {
            when.method(GET).path("/jobs/qto-3/status");
            then.status(200)
                .json_body(json!({"status": "failed", "error": "IfcOpenShell crashed"}));
        })
        .await;

    let op = Operation::QuantityTakeoff(QuantityTakeoffRequest {
        input_file: "/uploads/model.ifc".to_string(),
        output_file: None,
    });
    let err = gw
        .client
        .run(&op, helpers::fast_polling(30))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::JobFailed);
    assert!(err.message.contains("qto-3"));
    assert!(err.message.contains("IfcOpenShell crashed"));
}

#[tokio::test]
async fn test_no_wait_returns_submission_without_polling() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST).path("/ifcconvert");
            then.status(200).json_body(json!({"job_id": "conv-9"}));
        })
        .await;
    let status = gw
        .server
        .mock_async(|when, then| {
            when.path("/jobs/conv-9/status");
            then.status(200).json_body(json!({"status": "finished"}));
        })
        .await;

    let mut options = helpers::fast_polling(30);
    options.wait = false;
    let outcome = gw.client.run(&convert_op(), options).await.expect("outcome");

    assert_eq!(outcome.job_id(), Some("conv-9"));
    assert!(matches!(outcome, JobOutcome::Submitted { .. }));
    status.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_remote_error_on_submission() {
    let gw = TestGateway::start().await;
    gw.server
        .mock_async(|when, then| {
            when.method(POST).path("/ifcconvert");
            then.status(422)
                .json_body(json!({"detail": "input_filename does not exist"}));
        })
        .await;

    let err = gw
        .client
        .run(&convert_op(), helpers::fast_polling(30))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Remote);
    assert_eq!(err.status_code, Some(422));
    assert!(err.message.contains("does not exist"));
}

#[tokio::test]
async fn test_missing_required_field_sends_nothing() {
    let gw = TestGateway::start().await;
    let submit = gw
        .server
        .mock_async(|when, then| {
            when.method(POST).path("/ifcconvert");
            then.status(200).json_body(json!({"job_id": "never"}));
        })
        .await;

    let op = Operation::Convert(ConvertRequest {
        input_filename: String::new(),
        output_filename: "out.glb".to_string(),
        options: ConvertOptions::default(),
    });
    let err = gw
        .client
        .run(&op, helpers::fast_polling(30))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    submit.assert_hits_async(0).await;
}

//! # ifcpipeline-client
//!
//! Asynchronous client for the IFC Pipeline API gateway.
//!
//! - [`http`]: authenticated request layer (JSON, multipart upload, binary download)
//! - [`discovery`]: file and recipe listings normalized into selection options
//! - [`jobs`]: job submission and bounded polling
//! - [`builder`] and [`operations`]: typed operation requests and their wire bodies
//! - [`client`]: the high-level entry point tying these together

pub mod batch;
pub mod builder;
pub mod client;
pub mod discovery;
pub mod http;
pub mod jobs;
pub mod mime;
pub mod operations;
pub mod recipes;

pub use client::{IfcPipelineClient, RunOptions};
pub use http::{ApiClient, ApiRequest, UploadFile};
pub use jobs::{JobEngine, JobOutcome};

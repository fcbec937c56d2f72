//! # ifcpipeline-core
//!
//! Core crate for the IFC Pipeline client. Contains configuration schemas,
//! the shared domain types (credentials, jobs, recipes, selection options,
//! polling policies), and the unified error system.
//!
//! This crate has **no** internal dependencies on other IFC Pipeline crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

//! Shared domain types used across IFC Pipeline crates.

pub mod credential;
pub mod file;
pub mod job;
pub mod option;
pub mod polling;
pub mod recipe;

pub use credential::Credential;
pub use file::{ExtensionFilter, FileDescriptor};
pub use job::{Job, JobStatus};
pub use option::SelectOption;
pub use polling::PollingPolicy;
pub use recipe::{RecipeDescriptor, RecipeParameter};

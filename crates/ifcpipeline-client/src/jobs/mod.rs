//! Job submission and bounded polling.
//!
//! A submission either answers inline (no `job_id`) or returns a job id
//! which is then observed until it succeeds, fails, or the polling budget
//! runs out. Observation never cancels remote work.

pub mod backend;
pub mod engine;

pub use backend::JobBackend;
pub use engine::{JobEngine, JobOutcome};

//! End-to-end tests of the client against a mock gateway.

mod helpers;

mod discovery_test;
mod files_test;
mod jobs_test;
mod patch_test;

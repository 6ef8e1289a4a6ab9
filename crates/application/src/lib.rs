//! Music Smoke Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits for the HTTP client and the report sink
//! - The built-in music API suite
//! - The use case that runs a suite case by case

pub mod error;
pub mod ports;
pub mod run_smoke_suite;
pub mod suites;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError, Reporter};
pub use run_smoke_suite::RunSmokeSuite;
pub use suites::music_api_suite;

//! Music Smoke Domain - Core types
//!
//! This crate defines the domain model for the music API smoke-test runner:
//! test cases, resolved requests, captured responses and run outcomes.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use request::{HttpMethod, QueryParam, QueryParams, RequestSpec, validate_base_url};
pub use response::{ResponseSpec, StatusCode};
pub use testing::{
    RunSummary, SmokeSuite, StatusExpectation, TestCase, TestOutcome, TestResult,
    TransportErrorKind,
};

//! Music Smoke Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer, plus settings loading for the binary.

pub mod adapters;
pub mod settings;

pub use adapters::{ConsoleReporter, ReqwestHttpClient};
pub use settings::{SettingsError, SmokeSettings};

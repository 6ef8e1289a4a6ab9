//! Built-in smoke suites

pub mod music_api;

pub use music_api::music_api_suite;

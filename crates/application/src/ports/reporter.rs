//! Reporter port

use std::io;

use music_smoke_domain::{RequestSpec, RunSummary, SmokeSuite, TestCase, TestResult};
use url::Url;

/// Receives progress events from a smoke run, in order.
///
/// `index` is 1-based and matches the case's position in the suite.
pub trait Reporter {
    /// Called once before the first case.
    ///
    /// # Errors
    ///
    /// Returns an error if the report output cannot be written.
    fn suite_started(&mut self, suite: &SmokeSuite, base_url: &Url) -> io::Result<()>;

    /// Called before a case is sent. `request` is `None` when the case could
    /// not be resolved against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the report output cannot be written.
    fn case_started(
        &mut self,
        index: usize,
        case: &TestCase,
        request: Option<&RequestSpec>,
    ) -> io::Result<()>;

    /// Called with the outcome of a case.
    ///
    /// # Errors
    ///
    /// Returns an error if the report output cannot be written.
    fn case_finished(&mut self, index: usize, result: &TestResult) -> io::Result<()>;

    /// Called once after the last case, whatever the outcomes.
    ///
    /// # Errors
    ///
    /// Returns an error if the report output cannot be written.
    fn suite_finished(&mut self, summary: &RunSummary) -> io::Result<()>;
}

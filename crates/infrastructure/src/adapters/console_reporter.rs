//! Plain-text reporter for terminals and logs.

use std::io::{self, Stdout, Write};

use music_smoke_application::ports::Reporter;
use music_smoke_domain::{RequestSpec, RunSummary, SmokeSuite, TestCase, TestOutcome, TestResult};
use url::Url;

/// Indentation of the lines under a case heading.
const INDENT: &str = "   ";

/// Writes one block per case and a closing banner to any `Write` sink.
///
/// ```text
/// 3. Status query with invalid task id
///    GET http://localhost:5000/api/music/status?taskId=invalid_task_id
///    FAIL: expected status 404, received 200 OK
///    Response: {"status":"completed"}
/// ```
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn suite_started(&mut self, suite: &SmokeSuite, base_url: &Url) -> io::Result<()> {
        writeln!(
            self.out,
            "{} against {}",
            suite.name,
            base_url.as_str().trim_end_matches('/')
        )?;
        writeln!(self.out)
    }

    fn case_started(
        &mut self,
        index: usize,
        case: &TestCase,
        request: Option<&RequestSpec>,
    ) -> io::Result<()> {
        writeln!(self.out, "{index}. {}", case.name)?;
        match request {
            Some(request) => writeln!(self.out, "{INDENT}{request}"),
            None => writeln!(self.out, "{INDENT}{} {} (unresolved)", case.method, case.path),
        }
    }

    fn case_finished(&mut self, _index: usize, result: &TestResult) -> io::Result<()> {
        match &result.outcome {
            TestOutcome::Passed { status } => {
                writeln!(self.out, "{INDENT}PASS: received expected status {status}")?;
            }
            TestOutcome::StatusMismatch {
                expected,
                actual,
                body,
            } => {
                writeln!(
                    self.out,
                    "{INDENT}FAIL: expected status {expected}, received {actual}"
                )?;
                writeln!(self.out, "{INDENT}Response: {body}")?;
            }
            TestOutcome::TransportError { kind, message } => {
                writeln!(self.out, "{INDENT}ERROR: {}: {message}", kind.title())?;
            }
        }
        writeln!(self.out)
    }

    fn suite_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "All tests completed: {} passed, {} failed ({} total)",
            summary.passed(),
            summary.failed(),
            summary.total()
        )?;
        self.out.flush()
    }
}

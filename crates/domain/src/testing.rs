//! Smoke-test cases and their outcomes.
//!
//! A [`TestCase`] describes one request and the status it must produce.
//! Running it yields a [`TestResult`]; a whole run is folded into a
//! [`RunSummary`].

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::DomainResult;
use crate::request::{HttpMethod, QueryParam, QueryParams, RequestSpec};
use crate::response::{ResponseSpec, StatusCode};

/// Timeout applied to a case that does not set its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Expected status code value or range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (inclusive on both ends).
    Range {
        /// Minimum status code.
        min: u16,
        /// Maximum status code.
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Check if a status code satisfies this expectation.
    #[must_use]
    pub fn matches(&self, status: StatusCode) -> bool {
        let status = status.as_u16();
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
            Self::OneOf(codes) => {
                let codes: Vec<_> = codes.iter().map(ToString::to_string).collect();
                write!(f, "one of [{}]", codes.join(", "))
            }
        }
    }
}

/// One smoke-test case: a single request and the status it must return.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Human-readable name
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute path below the base URL, e.g. `/api/music/status`
    pub path: String,
    /// Query parameters, in order
    pub query: QueryParams,
    /// Optional JSON body
    pub body: Option<serde_json::Value>,
    /// Request timeout
    pub timeout: Duration,
    /// Expected response status
    pub expected: StatusExpectation,
}

impl TestCase {
    /// Creates a case with no query, no body and the default timeout.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        method: HttpMethod,
        path: impl Into<String>,
        expected: StatusExpectation,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            expected,
        }
    }

    /// Creates a GET case.
    #[must_use]
    pub fn get(name: impl Into<String>, path: impl Into<String>, expected: StatusExpectation) -> Self {
        Self::new(name, HttpMethod::Get, path, expected)
    }

    /// Creates a POST case carrying a JSON body.
    #[must_use]
    pub fn post_json(
        name: impl Into<String>,
        path: impl Into<String>,
        body: serde_json::Value,
        expected: StatusExpectation,
    ) -> Self {
        Self::new(name, HttpMethod::Post, path, expected).with_body(body)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves this case against the base URL into a sendable request.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the base URL or path is invalid.
    pub fn resolve(&self, base_url: &Url) -> DomainResult<RequestSpec> {
        RequestSpec::resolve(
            base_url,
            self.method,
            &self.path,
            &self.query,
            self.body.clone(),
            self.timeout,
        )
    }

    /// Compares a response against the expected status.
    #[must_use]
    pub fn evaluate(&self, response: &ResponseSpec) -> TestOutcome {
        if self.expected.matches(response.status) {
            TestOutcome::Passed {
                status: response.status,
            }
        } else {
            TestOutcome::StatusMismatch {
                expected: self.expected.clone(),
                actual: response.status,
                body: response.describe_body(),
            }
        }
    }
}

/// Why a request never produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Invalid URL format.
    InvalidUrl,
    /// DNS resolution failed.
    DnsError,
    /// Connection was refused by the server.
    ConnectionRefused,
    /// Could not establish a connection for another reason.
    ConnectionFailed,
    /// Request timed out.
    Timeout,
    /// Anything else.
    Other,
}

impl TransportErrorKind {
    /// Returns a short title for reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS lookup failed",
            Self::ConnectionRefused => "Connection refused",
            Self::ConnectionFailed => "Connection failed",
            Self::Timeout => "Request timed out",
            Self::Other => "Request failed",
        }
    }
}

/// Outcome of a single test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The service answered with an acceptable status.
    Passed {
        /// Received status.
        status: StatusCode,
    },
    /// The service answered, but with the wrong status.
    StatusMismatch {
        /// What the case expected.
        expected: StatusExpectation,
        /// What was received.
        actual: StatusCode,
        /// Rendered response body or parse failure.
        body: String,
    },
    /// The request did not complete.
    TransportError {
        /// Classified failure.
        kind: TransportErrorKind,
        /// Error description.
        message: String,
    },
}

impl TestOutcome {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

/// Result of running one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// Case name.
    pub name: String,
    /// What happened.
    pub outcome: TestOutcome,
    /// Wall time spent on the case.
    pub duration: Duration,
}

impl TestResult {
    /// Creates a new result.
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: TestOutcome, duration: Duration) -> Self {
        Self {
            name: name.into(),
            outcome,
            duration,
        }
    }

    /// Returns true if the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.outcome.is_passed()
    }
}

/// Aggregated results of a smoke run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Results in execution order.
    pub results: Vec<TestResult>,
    /// Wall time of the whole run.
    pub duration: Duration,
}

impl RunSummary {
    /// Creates a summary from ordered results.
    #[must_use]
    pub const fn new(results: Vec<TestResult>, duration: Duration) -> Self {
        Self { results, duration }
    }

    /// Number of cases that ran.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Number of failed cases, mismatches and transport errors alike.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Returns true if every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// An ordered, named list of test cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmokeSuite {
    /// Suite name.
    pub name: String,
    /// Cases in execution order.
    pub cases: Vec<TestCase>,
}

impl SmokeSuite {
    /// Create an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Appends a case.
    #[must_use]
    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Overrides the timeout of every case.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        for case in &mut self.cases {
            case.timeout = timeout;
        }
        self
    }

    /// Number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if the suite has no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(status, body.as_bytes().to_vec(), Duration::from_millis(3))
    }

    #[test]
    fn test_status_expectation_matches() {
        assert!(StatusExpectation::exact(401).matches(StatusCode::new(401)));
        assert!(!StatusExpectation::exact(401).matches(StatusCode::new(403)));

        let range = StatusExpectation::Range { min: 400, max: 499 };
        assert!(range.matches(StatusCode::new(404)));
        assert!(!range.matches(StatusCode::new(500)));

        let one_of = StatusExpectation::OneOf(vec![400, 404]);
        assert!(one_of.matches(StatusCode::new(404)));
        assert!(!one_of.matches(StatusCode::new(401)));
    }

    #[test]
    fn test_status_expectation_display() {
        assert_eq!(StatusExpectation::exact(404).to_string(), "404");
        assert_eq!(
            StatusExpectation::Range { min: 200, max: 299 }.to_string(),
            "200-299"
        );
        assert_eq!(
            StatusExpectation::OneOf(vec![400, 404]).to_string(),
            "one of [400, 404]"
        );
    }

    #[test]
    fn test_evaluate_pass_and_mismatch() {
        let case = TestCase::get("status", "/api/music/status", StatusExpectation::exact(404))
            .with_query("taskId", "invalid_task_id");

        assert_eq!(
            case.evaluate(&response(404, "")),
            TestOutcome::Passed {
                status: StatusCode::new(404)
            }
        );

        assert_eq!(
            case.evaluate(&response(200, r#"{"status":"completed"}"#)),
            TestOutcome::StatusMismatch {
                expected: StatusExpectation::exact(404),
                actual: StatusCode::new(200),
                body: r#"{"status":"completed"}"#.to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_case_with_query() {
        let case = TestCase::get("status", "/api/music/status", StatusExpectation::exact(404))
            .with_query("taskId", "invalid_task_id");
        let base = Url::parse("http://localhost:5000").unwrap();

        let request = case.resolve(&base).unwrap();
        assert_eq!(
            request.url.as_str(),
            "http://localhost:5000/api/music/status?taskId=invalid_task_id"
        );
        assert_eq!(request.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary::new(
            vec![
                TestResult::new(
                    "a",
                    TestOutcome::Passed {
                        status: StatusCode::new(401),
                    },
                    Duration::ZERO,
                ),
                TestResult::new(
                    "b",
                    TestOutcome::TransportError {
                        kind: TransportErrorKind::ConnectionRefused,
                        message: "connection refused".to_string(),
                    },
                    Duration::ZERO,
                ),
            ],
            Duration::from_millis(10),
        );

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_suite_timeout_override() {
        let suite = SmokeSuite::new("suite")
            .with_case(TestCase::get("a", "/a", StatusExpectation::exact(200)))
            .with_case(
                TestCase::get("b", "/b", StatusExpectation::exact(200))
                    .with_timeout(Duration::from_secs(10)),
            )
            .with_timeout(Duration::from_secs(2));

        assert_eq!(suite.len(), 2);
        assert!(suite.cases.iter().all(|c| c.timeout == Duration::from_secs(2)));
    }
}

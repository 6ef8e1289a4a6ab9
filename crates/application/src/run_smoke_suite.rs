//! Run Smoke Suite Use Case
//!
//! Sends every case of a suite, one after the other, and turns each response
//! or transport failure into a [`TestResult`]. A failing case never stops the
//! run.

use std::sync::Arc;
use std::time::Instant;

use music_smoke_domain::{
    DomainResult, RequestSpec, RunSummary, SmokeSuite, TestCase, TestOutcome, TestResult,
    TransportErrorKind,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::ApplicationResult;
use crate::ports::{HttpClient, Reporter};

/// Use case for running smoke suites against one service.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(ReqwestHttpClient::new()?);
/// let use_case = RunSmokeSuite::new(client, Url::parse("http://localhost:5000")?);
///
/// let mut reporter = ConsoleReporter::stdout();
/// let summary = use_case.run(&music_api_suite(), &mut reporter).await?;
/// ```
pub struct RunSmokeSuite<C: HttpClient> {
    client: Arc<C>,
    base_url: Url,
}

impl<C: HttpClient> RunSmokeSuite<C> {
    /// Creates the use case for the service at `base_url`.
    pub const fn new(client: Arc<C>, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Runs every case of `suite` in order, reporting as it goes.
    ///
    /// # Errors
    ///
    /// Returns an error only if the reporter fails to write. Case failures
    /// are part of the returned summary.
    pub async fn run<R>(&self, suite: &SmokeSuite, reporter: &mut R) -> ApplicationResult<RunSummary>
    where
        R: Reporter + ?Sized,
    {
        let start = Instant::now();
        info!(
            suite = %suite.name,
            base_url = %self.base_url,
            cases = suite.len(),
            "Starting smoke run"
        );
        reporter.suite_started(suite, &self.base_url)?;

        let mut results = Vec::with_capacity(suite.len());
        for (position, case) in suite.cases.iter().enumerate() {
            let index = position + 1;
            let request = case.resolve(&self.base_url);
            reporter.case_started(index, case, request.as_ref().ok())?;

            let result = self.execute_resolved(case, request).await;
            reporter.case_finished(index, &result)?;
            results.push(result);
        }

        let summary = RunSummary::new(results, start.elapsed());
        info!(
            passed = summary.passed(),
            failed = summary.failed(),
            elapsed_ms = summary.duration.as_millis(),
            "Smoke run finished"
        );
        reporter.suite_finished(&summary)?;

        Ok(summary)
    }

    /// Runs a single case without reporting.
    pub async fn run_case(&self, case: &TestCase) -> TestResult {
        let request = case.resolve(&self.base_url);
        self.execute_resolved(case, request).await
    }

    async fn execute_resolved(
        &self,
        case: &TestCase,
        request: DomainResult<RequestSpec>,
    ) -> TestResult {
        let start = Instant::now();

        let outcome = match request {
            Err(e) => TestOutcome::TransportError {
                kind: TransportErrorKind::InvalidUrl,
                message: e.to_string(),
            },
            Ok(request) => {
                debug!(case = %case.name, request = %request, timeout_ms = request.timeout_ms(), "Sending request");
                match self.client.execute(&request).await {
                    Ok(response) => {
                        debug!(
                            case = %case.name,
                            status = response.status.as_u16(),
                            elapsed = %response.duration_display(),
                            "Received response"
                        );
                        case.evaluate(&response)
                    }
                    Err(e) => TestOutcome::TransportError {
                        kind: e.kind(),
                        message: e.to_string(),
                    },
                }
            }
        };

        match &outcome {
            TestOutcome::Passed { .. } => {}
            TestOutcome::StatusMismatch {
                expected, actual, ..
            } => warn!(case = %case.name, %expected, actual = actual.as_u16(), "Unexpected status"),
            TestOutcome::TransportError { kind, message } => {
                warn!(case = %case.name, kind = kind.title(), error = %message, "Request failed");
            }
        }

        TestResult::new(&case.name, outcome, start.elapsed())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::ports::HttpClientError;
    use crate::suites::music_api::{self, music_api_suite};
    use music_smoke_domain::{ResponseSpec, StatusCode, StatusExpectation};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    type Canned = Result<(u16, &'static str), HttpClientError>;

    /// Mock HTTP client answering by `METHOD url` with canned responses.
    struct MockHttpClient {
        routes: HashMap<String, Canned>,
        fallback: Canned,
        seen: Mutex<Vec<RequestSpec>>,
    }

    impl MockHttpClient {
        fn new(fallback: Canned) -> Self {
            Self {
                routes: HashMap::new(),
                fallback,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn route(mut self, target: &str, canned: Canned) -> Self {
            self.routes.insert(target.to_string(), canned);
            self
        }

        /// Routes that answer exactly as the music API is expected to.
        fn conforming() -> Self {
            Self::new(Ok((500, "unexpected")))
                .route("POST http://localhost:5000/api/music/generate", Ok((401, r#"{"error":"Unauthorized"}"#)))
                .route("GET http://localhost:5000/api/music/status", Ok((400, r#"{"error":"taskId is required"}"#)))
                .route(
                    "GET http://localhost:5000/api/music/status?taskId=invalid_task_id",
                    Ok((404, r#"{"error":"Task not found"}"#)),
                )
                .route("GET http://localhost:5000/api/music/recent", Ok((401, r#"{"error":"Unauthorized"}"#)))
        }
    }

    impl HttpClient for MockHttpClient {
        async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
            self.seen.lock().expect("lock").push(request.clone());
            let canned = self
                .routes
                .get(&request.to_string())
                .unwrap_or(&self.fallback)
                .clone();
            canned.map(|(status, body)| {
                ResponseSpec::new(status, body.as_bytes().to_vec(), Duration::from_millis(1))
            })
        }
    }

    /// Reporter recording each event as a line.
    #[derive(Default)]
    struct RecordingReporter {
        events: Vec<String>,
    }

    impl Reporter for RecordingReporter {
        fn suite_started(&mut self, suite: &SmokeSuite, base_url: &Url) -> io::Result<()> {
            self.events.push(format!("start {} {base_url}", suite.len()));
            Ok(())
        }

        fn case_started(
            &mut self,
            index: usize,
            _case: &TestCase,
            request: Option<&RequestSpec>,
        ) -> io::Result<()> {
            let target = request.map_or_else(|| "unresolved".to_string(), ToString::to_string);
            self.events.push(format!("case {index} {target}"));
            Ok(())
        }

        fn case_finished(&mut self, index: usize, result: &TestResult) -> io::Result<()> {
            self.events.push(format!("done {index} {}", result.passed()));
            Ok(())
        }

        fn suite_finished(&mut self, summary: &RunSummary) -> io::Result<()> {
            self.events
                .push(format!("finish {}/{}", summary.passed(), summary.total()));
            Ok(())
        }
    }

    struct BrokenPipeReporter;

    impl Reporter for BrokenPipeReporter {
        fn suite_started(&mut self, _: &SmokeSuite, _: &Url) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn case_started(&mut self, _: usize, _: &TestCase, _: Option<&RequestSpec>) -> io::Result<()> {
            Ok(())
        }

        fn case_finished(&mut self, _: usize, _: &TestResult) -> io::Result<()> {
            Ok(())
        }

        fn suite_finished(&mut self, _: &RunSummary) -> io::Result<()> {
            Ok(())
        }
    }

    fn use_case(client: MockHttpClient) -> RunSmokeSuite<MockHttpClient> {
        RunSmokeSuite::new(
            Arc::new(client),
            Url::parse("http://localhost:5000").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_conforming_service_passes_every_case() {
        let use_case = use_case(MockHttpClient::conforming());
        let mut reporter = RecordingReporter::default();

        let summary = use_case.run(&music_api_suite(), &mut reporter).await.unwrap();

        assert_eq!(summary.total(), 4);
        assert!(summary.all_passed());
        assert_eq!(
            reporter.events,
            vec![
                "start 4 http://localhost:5000/",
                "case 1 POST http://localhost:5000/api/music/generate",
                "done 1 true",
                "case 2 GET http://localhost:5000/api/music/status",
                "done 2 true",
                "case 3 GET http://localhost:5000/api/music/status?taskId=invalid_task_id",
                "done 3 true",
                "case 4 GET http://localhost:5000/api/music/recent",
                "done 4 true",
                "finish 4/4",
            ]
        );
    }

    #[tokio::test]
    async fn test_generation_sends_json_payload() {
        let client = Arc::new(MockHttpClient::conforming());
        let use_case = RunSmokeSuite::new(
            Arc::clone(&client),
            Url::parse("http://localhost:5000").unwrap(),
        );

        let result = use_case.run_case(&music_api::unauthenticated_generation()).await;
        assert!(result.passed());

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let body = seen[0].body.as_ref().expect("generation carries a body");
        assert_eq!(body["model"], "music-s");
        assert_eq!(seen[0].timeout, music_api::GENERATE_TIMEOUT);
    }

    #[tokio::test]
    async fn test_found_task_is_reported_with_received_code() {
        let client = MockHttpClient::conforming().route(
            "GET http://localhost:5000/api/music/status?taskId=invalid_task_id",
            Ok((200, r#"{"status":"completed"}"#)),
        );
        let use_case = use_case(client);
        let mut reporter = RecordingReporter::default();

        let summary = use_case.run(&music_api_suite(), &mut reporter).await.unwrap();

        assert_eq!(summary.passed(), 3);
        assert_eq!(
            summary.results[2].outcome,
            TestOutcome::StatusMismatch {
                expected: StatusExpectation::exact(404),
                actual: StatusCode::new(200),
                body: r#"{"status":"completed"}"#.to_string(),
            }
        );
        assert_eq!(reporter.events.last().map(String::as_str), Some("finish 3/4"));
    }

    #[tokio::test]
    async fn test_unreachable_service_runs_every_case() {
        let client = MockHttpClient::new(Err(HttpClientError::ConnectionRefused {
            host: "localhost".to_string(),
            port: 5000,
            message: "tcp connect error: Connection refused (os error 111)".to_string(),
        }));
        let use_case = use_case(client);
        let mut reporter = RecordingReporter::default();

        let summary = use_case.run(&music_api_suite(), &mut reporter).await.unwrap();

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.failed(), 4);
        for result in &summary.results {
            assert_eq!(
                result.outcome,
                TestOutcome::TransportError {
                    kind: TransportErrorKind::ConnectionRefused,
                    message: "connection refused by localhost:5000: \
                              tcp connect error: Connection refused (os error 111)"
                        .to_string(),
                }
            );
        }
        assert_eq!(reporter.events.last().map(String::as_str), Some("finish 0/4"));
    }

    #[tokio::test]
    async fn test_timeout_is_caught_per_case() {
        let client = MockHttpClient::conforming().route(
            "POST http://localhost:5000/api/music/generate",
            Err(HttpClientError::Timeout { timeout_ms: 10_000 }),
        );
        let use_case = use_case(client);

        let summary = use_case
            .run(&music_api_suite(), &mut RecordingReporter::default())
            .await
            .unwrap();

        assert!(matches!(
            summary.results[0].outcome,
            TestOutcome::TransportError {
                kind: TransportErrorKind::Timeout,
                ..
            }
        ));
        assert!(summary.results[1..].iter().all(TestResult::passed));
    }

    #[tokio::test]
    async fn test_unresolvable_base_url_fails_cases_without_sending() {
        let client = Arc::new(MockHttpClient::conforming());
        let use_case = RunSmokeSuite::new(
            Arc::clone(&client),
            Url::parse("ftp://localhost/").unwrap(),
        );
        let mut reporter = RecordingReporter::default();

        let summary = use_case.run(&music_api_suite(), &mut reporter).await.unwrap();

        assert_eq!(summary.failed(), 4);
        assert!(client.seen.lock().unwrap().is_empty());
        assert_eq!(reporter.events[1], "case 1 unresolved");
        assert_eq!(reporter.events.last().map(String::as_str), Some("finish 0/4"));
    }

    #[tokio::test]
    async fn test_reporter_failure_stops_the_run() {
        let use_case = use_case(MockHttpClient::conforming());

        let result = use_case.run(&music_api_suite(), &mut BrokenPipeReporter).await;

        assert!(matches!(result, Err(ApplicationError::Report(_))));
    }
}

//! Smoke suite for the music generation API.
//!
//! Four unauthenticated or malformed calls, each with the status the service
//! is expected to reject it with. The expectations come from how the service
//! is believed to behave, so they all live here.

use std::time::Duration;

use music_smoke_domain::{SmokeSuite, StatusExpectation, TestCase};
use serde_json::json;

/// Generation endpoint.
pub const GENERATE_PATH: &str = "/api/music/generate";
/// Task status endpoint.
pub const STATUS_PATH: &str = "/api/music/status";
/// Recent generations endpoint.
pub const RECENT_PATH: &str = "/api/music/recent";

/// Query parameter carrying the task identifier.
pub const TASK_ID_PARAM: &str = "taskId";
/// Well-formed task identifier that no job should ever have.
pub const INVALID_TASK_ID: &str = "invalid_task_id";

/// Generation can be slow to reject; give it longer.
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the read-only endpoints.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the suite returned by [`music_api_suite`].
pub const SUITE_NAME: &str = "Music API smoke tests";

/// `POST /api/music/generate` with a sample payload and no credentials: 401.
#[must_use]
pub fn unauthenticated_generation() -> TestCase {
    TestCase::post_json(
        "Unauthenticated generation request",
        GENERATE_PATH,
        json!({
            "prompt": "An upbeat electronic track with bright synth leads",
            "model": "music-s",
            "title": "Smoke Test Track",
        }),
        StatusExpectation::exact(401),
    )
    .with_timeout(GENERATE_TIMEOUT)
}

/// `GET /api/music/status` without a task id: 400.
#[must_use]
pub fn status_without_task_id() -> TestCase {
    TestCase::get(
        "Status query without task id",
        STATUS_PATH,
        StatusExpectation::exact(400),
    )
    .with_timeout(QUERY_TIMEOUT)
}

/// `GET /api/music/status?taskId=invalid_task_id`: 404.
#[must_use]
pub fn status_with_invalid_task_id() -> TestCase {
    TestCase::get(
        "Status query with invalid task id",
        STATUS_PATH,
        StatusExpectation::exact(404),
    )
    .with_query(TASK_ID_PARAM, INVALID_TASK_ID)
    .with_timeout(QUERY_TIMEOUT)
}

/// `GET /api/music/recent` without credentials: 401.
#[must_use]
pub fn history_without_auth() -> TestCase {
    TestCase::get(
        "History query without authentication",
        RECENT_PATH,
        StatusExpectation::exact(401),
    )
    .with_timeout(QUERY_TIMEOUT)
}

/// The four music API cases in their fixed order.
#[must_use]
pub fn music_api_suite() -> SmokeSuite {
    SmokeSuite::new(SUITE_NAME)
        .with_case(unauthenticated_generation())
        .with_case(status_without_task_id())
        .with_case(status_with_invalid_task_id())
        .with_case(history_without_auth())
}

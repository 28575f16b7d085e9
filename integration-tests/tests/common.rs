use integration_tests::harness::MockApi;
use querytail_core::api::{HttpQueryJobs, Query};
use querytail_core::format::{DEFAULT_FORMAT, FieldInterpreters};
use querytail_core::progress::QueryProgress;
use querytail_core::search::{SearchError, SearchOutcome, SearchRequest, run_search};
use tokio_util::sync::CancellationToken;

pub const TOKEN: &str = "test-token";

pub fn request(query: &str, live: bool, format: &str) -> SearchRequest {
    SearchRequest {
        repository: "sandbox".to_string(),
        query: Query {
            query_string: query.to_string(),
            start: "10m".to_string(),
            end: None,
            is_live: live,
        },
        format: format.to_string(),
    }
}

pub fn default_request(query: &str) -> SearchRequest {
    request(query, false, DEFAULT_FORMAT)
}

/// Runs a search against the mock and returns what it printed.
pub async fn search(
    api: &MockApi,
    request: &SearchRequest,
    cancel: &CancellationToken,
) -> (Result<SearchOutcome, SearchError>, Vec<String>) {
    let jobs = HttpQueryJobs::new(&api.address(), Some(TOKEN.to_string()))
        .expect("mock address is valid");
    let mut out = Vec::new();

    let result = run_search(
        &jobs,
        request,
        &mut out,
        &mut QueryProgress::hidden(),
        FieldInterpreters::default(),
        cancel,
    )
    .await;

    let lines = String::from_utf8_lossy(&out)
        .lines()
        .map(str::to_string)
        .collect();
    (result, lines)
}

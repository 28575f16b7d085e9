use crate::api::{JobHandle, Query, QueryJobs};
use crate::format::FieldInterpreters;
use crate::progress::ProgressSink;
use crate::render::ResultPrinter;
use crate::search::constants::DELETE_TIMEOUT;
use crate::search::error::{PollError, SearchError};
use crate::search::poller::BackoffPoller;
use std::io::{self, Write};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub repository: String,
    pub query: Query,
    /// Event line format, e.g. `{@timestamp} {@rawstring}`.
    pub format: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SearchOutcome {
    Completed,
    Cancelled,
}

/// How the poll loop stopped, before cancellation is folded into success.
enum Stop {
    Cancelled,
    Failed(SearchError),
}

impl From<PollError> for Stop {
    fn from(e: PollError) -> Self {
        match e {
            PollError::Cancelled => Stop::Cancelled,
            PollError::Transport(e) => Stop::Failed(e.into()),
        }
    }
}

impl From<io::Error> for Stop {
    fn from(e: io::Error) -> Self {
        Stop::Failed(e.into())
    }
}

/// Runs one search: create the job, poll it to completion, render, and for
/// live queries keep polling and rendering until cancelled or failed.
///
/// Once created, the job is deleted on every exit from the poll loop. Cleanup
/// assumes the future runs to completion: dropping it mid-search, or a panic
/// inside the loop, leaves the job for the server to expire. Cancel through
/// `cancel` to stop a search and still delete its job.
pub async fn run_search<J, W, P>(
    jobs: &J,
    request: &SearchRequest,
    out: W,
    progress: &mut P,
    interpreters: FieldInterpreters,
    cancel: &CancellationToken,
) -> Result<SearchOutcome, SearchError>
where
    J: QueryJobs + ?Sized,
    W: Write,
    P: ProgressSink + ?Sized,
{
    let job = jobs.create(&request.repository, &request.query).await?;

    let stopped = poll_loop(jobs, &job, request, out, progress, interpreters, cancel).await;
    progress.finish();
    delete_best_effort(jobs, job).await;

    match stopped {
        Ok(()) => Ok(SearchOutcome::Completed),
        Err(Stop::Cancelled) => {
            tracing::info!(repository = %request.repository, "search cancelled");
            Ok(SearchOutcome::Cancelled)
        }
        Err(Stop::Failed(e)) => Err(e),
    }
}

async fn poll_loop<J, W, P>(
    jobs: &J,
    job: &JobHandle,
    request: &SearchRequest,
    out: W,
    progress: &mut P,
    interpreters: FieldInterpreters,
    cancel: &CancellationToken,
) -> Result<(), Stop>
where
    J: QueryJobs + ?Sized,
    W: Write,
    P: ProgressSink + ?Sized,
{
    let live = request.query.is_live;
    let mut poller = BackoffPoller::new(jobs, job, live);

    let mut result = poller.wait_and_poll(cancel).await?;
    while !result.done {
        let meta = &result.meta_data;
        if meta.total_work > 0 {
            progress.update(meta.total_work, meta.work_done);
        }
        result = poller.wait_and_poll(cancel).await?;
    }
    progress.finish();

    let mut printer = ResultPrinter::for_result(&result, out, &request.format, interpreters);
    printer.print(&result)?;

    if !live {
        return Ok(());
    }

    loop {
        let result = poller.wait_and_poll(cancel).await?;
        printer.print(&result)?;
    }
}

/// The server expires abandoned jobs, so failure here is only logged.
async fn delete_best_effort<J>(jobs: &J, job: JobHandle)
where
    J: QueryJobs + ?Sized,
{
    let job_id = job.id.clone();

    match tokio::time::timeout(DELETE_TIMEOUT, jobs.delete(job)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(%job_id, error = %e, "failed to delete query job"),
        Err(_) => tracing::warn!(%job_id, "timed out deleting query job"),
    }
}

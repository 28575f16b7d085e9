use crate::api::{JobHandle, QueryJobs, QueryResult};
use crate::search::error::PollError;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PollState {
    Idle,
    Waiting,
    Polling,
    Done,
    Cancelled,
    Failed,
}

/// Polls one query job at the pace the server asks for.
///
/// Every poll result carries `pollAfter`; the next poll is not issued before
/// that many milliseconds have passed. Waits and polls both give way to the
/// cancellation token. Transport errors are returned as-is, without retry.
pub struct BackoffPoller<'a, J: ?Sized> {
    jobs: &'a J,
    job: &'a JobHandle,
    live: bool,
    state: PollState,
    next_poll: Instant,
}

impl<'a, J> BackoffPoller<'a, J>
where
    J: QueryJobs + ?Sized,
{
    pub fn new(jobs: &'a J, job: &'a JobHandle, live: bool) -> Self {
        Self {
            jobs,
            job,
            live,
            state: PollState::Idle,
            next_poll: Instant::now(),
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn next_poll(&self) -> Instant {
        self.next_poll
    }

    pub async fn wait_and_poll(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<QueryResult, PollError> {
        if self.state == PollState::Cancelled {
            return Err(PollError::Cancelled);
        }

        self.state = PollState::Waiting;
        let waited = tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = sleep_until(self.next_poll) => true,
        };
        if !waited {
            return self.cancelled();
        }

        self.state = PollState::Polling;
        let polled = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            res = self.jobs.poll(self.job) => Some(res),
        };

        match polled {
            None => self.cancelled(),
            Some(Err(e)) => {
                self.state = PollState::Failed;
                Err(e.into())
            }
            Some(Ok(result)) => {
                let poll_after = result.meta_data.poll_after;
                self.next_poll = Instant::now() + Duration::from_millis(poll_after);
                self.state = if result.done && !self.live {
                    PollState::Done
                } else {
                    PollState::Waiting
                };

                tracing::debug!(
                    job_id = %self.job.id,
                    done = result.done,
                    events = result.events.len(),
                    poll_after,
                    "polled query job"
                );
                Ok(result)
            }
        }
    }

    fn cancelled(&mut self) -> Result<QueryResult, PollError> {
        self.state = PollState::Cancelled;
        Err(PollError::Cancelled)
    }
}

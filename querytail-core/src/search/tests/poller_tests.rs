use super::fakes::{FakeJobs, done, job, pending, unavailable};
use crate::api::{JobOp, TransportError};
use crate::search::{BackoffPoller, PollError, PollState};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn first_poll_is_immediate() {
    let jobs = FakeJobs::scripted(vec![Ok(pending(500, 0, 0))]);
    let job = job();
    let mut poller = BackoffPoller::new(&jobs, &job, false);
    assert_eq!(poller.state(), PollState::Idle);

    let started = Instant::now();
    poller.wait_and_poll(&CancellationToken::new()).await.unwrap();

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(poller.state(), PollState::Waiting);
}

#[tokio::test(start_paused = true)]
async fn next_poll_waits_for_poll_after() {
    let jobs = FakeJobs::scripted(vec![Ok(pending(500, 0, 0)), Ok(done(0, Vec::new()))]);
    let job = job();
    let cancel = CancellationToken::new();
    let mut poller = BackoffPoller::new(&jobs, &job, false);

    poller.wait_and_poll(&cancel).await.unwrap();
    let answered = Instant::now();
    assert_eq!(poller.next_poll(), answered + Duration::from_millis(500));

    let result = poller.wait_and_poll(&cancel).await.unwrap();

    assert!(result.done);
    assert!(answered.elapsed() >= Duration::from_millis(500));
    assert_eq!(jobs.poll_count(), 2);
    assert_eq!(poller.state(), PollState::Done);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_wait_skips_the_poll() {
    let jobs = FakeJobs::scripted(vec![Ok(pending(10_000, 0, 0)), Ok(done(0, Vec::new()))]);
    let job = job();
    let cancel = CancellationToken::new();
    let mut poller = BackoffPoller::new(&jobs, &job, false);

    poller.wait_and_poll(&cancel).await.unwrap();

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel();
        }
    });

    let started = Instant::now();
    let res = poller.wait_and_poll(&cancel).await;

    assert!(matches!(res, Err(PollError::Cancelled)));
    assert!(started.elapsed() < Duration::from_millis(10_000));
    assert_eq!(jobs.poll_count(), 1);
    assert_eq!(poller.state(), PollState::Cancelled);

    // Cancellation is terminal.
    assert!(matches!(
        poller.wait_and_poll(&cancel).await,
        Err(PollError::Cancelled)
    ));
    assert_eq!(jobs.poll_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn already_cancelled_never_polls() {
    let jobs = FakeJobs::scripted(vec![Ok(done(0, Vec::new()))]);
    let job = job();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut poller = BackoffPoller::new(&jobs, &job, false);

    assert!(matches!(
        poller.wait_and_poll(&cancel).await,
        Err(PollError::Cancelled)
    ));
    assert_eq!(jobs.poll_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_interrupts_an_in_flight_poll() {
    let cancel = CancellationToken::new();
    let jobs = FakeJobs::scripted(Vec::new()).cancel_when_exhausted(cancel.clone());
    let job = job();
    let mut poller = BackoffPoller::new(&jobs, &job, false);

    assert!(matches!(
        poller.wait_and_poll(&cancel).await,
        Err(PollError::Cancelled)
    ));
    assert_eq!(jobs.poll_count(), 1);
    assert_eq!(poller.state(), PollState::Cancelled);
}

#[tokio::test(start_paused = true)]
async fn transport_errors_propagate_unchanged() {
    let jobs = FakeJobs::scripted(vec![Err(unavailable(JobOp::Poll))]);
    let job = job();
    let mut poller = BackoffPoller::new(&jobs, &job, false);

    let err = poller
        .wait_and_poll(&CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PollError::Transport(TransportError::Status {
            op: JobOp::Poll,
            status: 503,
            ..
        })
    ));
    assert_eq!(poller.state(), PollState::Failed);
    assert_eq!(jobs.poll_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn live_jobs_never_reach_done() {
    let jobs = FakeJobs::scripted(vec![Ok(done(1_000, Vec::new()))]);
    let job = job();
    let mut poller = BackoffPoller::new(&jobs, &job, true);

    let result = poller.wait_and_poll(&CancellationToken::new()).await.unwrap();

    assert!(result.done);
    assert_eq!(poller.state(), PollState::Waiting);
}

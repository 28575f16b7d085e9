use anyhow::{Context, Result};
use clap::Args;
use querytail_core::api::{HttpQueryJobs, Query};
use querytail_core::config::ClientConfig;
use querytail_core::format::{DEFAULT_FORMAT, FieldInterpreters};
use querytail_core::interrupt::cancel_on_interrupt;
use querytail_core::progress::QueryProgress;
use querytail_core::search::{SearchRequest, run_search};
use std::io;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Repository to search
    repository: String,

    /// Query string
    query: String,

    /// Query start time
    #[arg(short, long, default_value = "10m")]
    start: String,

    /// Query end time
    #[arg(short, long)]
    end: Option<String>,

    /// Run a live search and keep outputting until interrupted.
    #[arg(short, long)]
    live: bool,

    /// Format string if the result is an event list.
    ///
    /// Insert fields by wrapping field names in brackets, e.g. {@timestamp}.
    /// Limited format modifiers are supported such as {@timestamp:40} which
    /// will right align and left pad @timestamp to 40 characters.
    /// {@timestamp:-40} left aligns and right pads to 40 characters.
    #[arg(short = 'f', long = "fmt", default_value = DEFAULT_FORMAT)]
    format: String,

    /// Do not show progress information.
    #[arg(long)]
    no_progress: bool,
}

pub fn run(config: ClientConfig, args: SearchArgs) -> Result<()> {
    // Single flow of control: the interrupt listener is the only other task.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    runtime.block_on(search(config, args))
}

async fn search(config: ClientConfig, args: SearchArgs) -> Result<()> {
    let jobs = HttpQueryJobs::new(&config.address, config.token)?;
    let cancel = cancel_on_interrupt();

    let mut progress = if args.no_progress {
        QueryProgress::hidden()
    } else {
        QueryProgress::new()
    };

    let request = SearchRequest {
        repository: args.repository,
        query: Query {
            query_string: args.query,
            start: args.start,
            end: args.end,
            is_live: args.live,
        },
        format: args.format,
    };

    let outcome = run_search(
        &jobs,
        &request,
        io::stdout(),
        &mut progress,
        FieldInterpreters::default(),
        &cancel,
    )
    .await?;

    tracing::debug!(?outcome, "search finished");
    Ok(())
}

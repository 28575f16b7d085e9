use crate::api::TransportError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("search cancelled")]
    Cancelled,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures reported to the user. Cancellation is not one of them.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to write results: {0}")]
    Output(#[from] io::Error),
}

use std::fmt;
use thiserror::Error;

/// Which query-job call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOp {
    Create,
    Poll,
    Delete,
}

impl fmt::Display for JobOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobOp::Create => "create query job",
            JobOp::Poll => "poll query job",
            JobOp::Delete => "delete query job",
        })
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("failed to {op}: {source}")]
    Request {
        op: JobOp,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to {op}: server responded {status}: {body}")]
    Status { op: JobOp, status: u16, body: String },
}

impl TransportError {
    pub fn request(op: JobOp, source: reqwest::Error) -> Self {
        Self::Request { op, source }
    }

    pub fn status(op: JobOp, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            op,
            status,
            body: body.into(),
        }
    }
}

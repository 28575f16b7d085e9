use std::time::Duration;

/// Upper bound on the best-effort job delete after the poll loop exits.
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(5);

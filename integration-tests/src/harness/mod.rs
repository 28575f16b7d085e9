pub mod api;
pub mod tracing;

pub use api::{MockApi, RecordedRequest, done_response, pending_response};
pub use tracing::{CapturedEvent, init_test_tracing};

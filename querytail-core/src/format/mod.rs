mod interpreters;
mod program;

pub use interpreters::*;
pub use program::*;

pub const DEFAULT_FORMAT: &str = "{@timestamp} {@rawstring}";

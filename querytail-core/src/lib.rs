pub mod api;
pub mod config;
pub mod format;
pub mod interrupt;
pub mod logging;
pub mod progress;
pub mod render;
pub mod search;

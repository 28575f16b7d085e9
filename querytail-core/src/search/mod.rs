mod constants;
mod error;
mod poller;
mod run;
#[cfg(test)]
mod tests;

pub use constants::*;
pub use error::*;
pub use poller::*;
pub use run::*;

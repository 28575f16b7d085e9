mod client;
mod error;
mod types;
#[cfg(test)]
mod tests;

pub use client::*;
pub use error::*;
pub use types::*;

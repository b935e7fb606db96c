//! Last.fm REST API access

pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod transport;
mod wire;

pub use client::LastfmClient;
pub use error::LastfmError;

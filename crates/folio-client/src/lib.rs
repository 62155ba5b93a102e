//! Folio Server Client
//!
//! Typed access to the routes of the local server that renders and serves
//! the filings.

mod client;
mod error;

pub use client::{routes, ViewerClient};
pub use error::ClientError;

pub type Result<T> = std::result::Result<T, ClientError>;

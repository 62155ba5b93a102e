//! Card error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Invalid filing descriptor {route}: {reason}")]
    InvalidDescriptor { route: String, reason: String },
}

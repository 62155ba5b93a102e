//! Theme error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Unknown text color: {0}")]
    UnknownTextColor(String),

    #[error("Palette table is empty")]
    EmptyTable,
}

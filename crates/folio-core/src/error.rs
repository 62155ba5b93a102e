//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] folio_tabs::TabError),

    #[error("Card error: {0}")]
    Card(#[from] folio_cards::CardError),

    #[error("Theme error: {0}")]
    Theme(#[from] folio_theme::ThemeError),

    #[error("Server error: {0}")]
    Client(#[from] folio_client::ClientError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filing has no primary document: {0}")]
    NotViewable(String),

    #[error("Folder dialog is not open")]
    DialogClosed,

    #[error("Theme palettes not loaded")]
    ThemeNotLoaded,

    #[error("Viewer not initialized")]
    NotInitialized,
}

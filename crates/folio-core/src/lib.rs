//! Folio Core
//!
//! Coordination layer of the filings viewer. The [`Viewer`] owns all page
//! state; callers feed it user commands and server responses.

mod config;
mod error;
mod menu;
mod viewer;

pub use config::{Config, CONFIG_ENV, SERVER_URL_ENV};
pub use error::CoreError;
pub use menu::{InputEvent, MenuState};
pub use viewer::{RefreshIndicator, RefreshTicket, Section, Viewer};

// Re-export core components
pub use folio_cards::{
    edgar_link, Card, CardDeck, CardError, CardField, FilingDescriptor, FilingListing, SortKey,
};
pub use folio_client::{routes, ClientError, ViewerClient};
pub use folio_folders::{DialogSession, FolderDialog, FolderOption, Picked};
pub use folio_tabs::{
    DocumentVariant, FilingKey, Focus, Frame, NavTab, Opened, ScrollDirection, Selector,
    SelectorOption, Shown, TabError, TabManager, TabState, TitleRegion,
};
pub use folio_theme::{
    MenuEntry, Palette, PaletteTable, TextColors, TextTone, ThemeError, ThemeMenu, ThemeState,
    RANDOM_ENTRY_ID,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

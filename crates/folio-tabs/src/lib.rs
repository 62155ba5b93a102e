//! Folio Tab Management
//!
//! Lifecycle of the document tabs opened from filing cards. Each open filing
//! owns exactly one triple of navigation tab, viewer frame and document-type
//! selector; the triple is created on first open, reused afterwards, and torn
//! down together when the tab is closed.

mod error;
mod frame;
mod key;
mod manager;
mod state;
mod tab;

pub use error::TabError;
pub use frame::{DocumentVariant, Frame, Selector, SelectorOption};
pub use key::FilingKey;
pub use manager::{Focus, Opened, ScrollDirection, Shown, TabManager, TitleRegion};
pub use state::TabState;
pub use tab::{CardRef, NavTab};

pub type Result<T> = std::result::Result<T, TabError>;

//! Folio Theming
//!
//! Palettes are tables of CSS custom properties. Applying one writes every
//! property onto the root style; the theme menu lists the first few palettes
//! plus one entry that picks a palette at random.

mod error;
mod menu;
mod palette;
mod state;

pub use error::ThemeError;
pub use menu::{MenuEntry, ThemeMenu, MENU_SIZE, RANDOM_ENTRY_ID};
pub use palette::{Palette, PaletteTable, TextColors};
pub use state::{TextTone, ThemeState};

pub type Result<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
pub(crate) mod fixtures;

//! Folio Filing Cards
//!
//! Cards are built from the filings listing served for the configured
//! look-in folders. The deck keeps them ordered, sortable by a few metadata
//! fields, and filterable by free-text search.

mod card;
mod deck;
mod descriptor;
mod error;

pub use card::{edgar_link, Card, CardField};
pub use deck::{CardDeck, SortKey};
pub use descriptor::{DataAttrs, FilingDescriptor, FilingListing, LabeledValue};
pub use error::CardError;

pub type Result<T> = std::result::Result<T, CardError>;

#[cfg(test)]
pub(crate) mod fixtures;

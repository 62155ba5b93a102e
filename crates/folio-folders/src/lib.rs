//! Folio Look-in Folders
//!
//! Editing model for the list of directories the server scans for rendered
//! filings. The list is edited locally while the dialog is open and posted
//! back to the server on save.

mod dialog;

pub use dialog::{DialogSession, FolderDialog, FolderOption, Picked};

//! Folder selection dialog

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderOption {
    pub path: String,
    pub selected: bool,
}

impl FolderOption {
    fn new(path: impl Into<String>, selected: bool) -> Self {
        Self {
            path: path.into(),
            selected,
        }
    }
}

/// Result of handing a picked directory to the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Picked {
    /// Empty pick or dialog already closed
    Ignored,
    /// The path was listed already and is now the selection
    Selected,
    /// The path was appended as the selection
    Added,
}

/// Identifies one opening of the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSession(u64);

#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderDialog {
    open: bool,
    /// Bumped on every open
    session: u64,
    options: Vec<FolderOption>,
}

impl FolderDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with the server's paths, nothing selected
    pub fn populate<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = paths
            .into_iter()
            .map(|p| FolderOption::new(p, false))
            .collect();
    }

    pub fn open(&mut self) {
        self.open = true;
        self.session += 1;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn session(&self) -> DialogSession {
        DialogSession(self.session)
    }

    /// Take the directory returned by the native picker
    ///
    /// The picker answers asynchronously, so the dialog may have been closed
    /// in the meantime; such answers are dropped.
    pub fn add_picked(&mut self, path: &str) -> Picked {
        if path.is_empty() || !self.open {
            tracing::debug!(path = %path, open = self.open, "Ignoring picked folder");
            return Picked::Ignored;
        }

        let mut found = false;
        for option in &mut self.options {
            option.selected = option.path == path;
            found |= option.selected;
        }

        if found {
            Picked::Selected
        } else {
            self.options.push(FolderOption::new(path, true));
            tracing::debug!(path = %path, "Folder added");
            Picked::Added
        }
    }

    /// Replace the selection with the given paths
    pub fn select(&mut self, paths: &[String]) {
        for option in &mut self.options {
            option.selected = paths.contains(&option.path);
        }
    }

    /// Remove the selected options, or every option; returns how many went
    pub fn remove(&mut self, selected_only: bool) -> usize {
        let before = self.options.len();
        if selected_only {
            self.options.retain(|o| !o.selected);
        } else {
            self.options.clear();
        }
        before - self.options.len()
    }

    /// Close without saving; local edits stay until [`FolderDialog::reset`]
    /// brings back the server's list for the returned session
    pub fn cancel(&mut self) -> DialogSession {
        self.close();
        self.session()
    }

    /// Show the server's list again after a cancel
    ///
    /// Dropped when the dialog was reopened since, so a late answer never
    /// touches a dialog the user is editing. Returns whether it applied.
    pub fn reset<I, S>(&mut self, session: DialogSession, server_paths: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.open || session != self.session() {
            tracing::debug!(open = self.open, "Dropping stale folder reset");
            return false;
        }
        self.populate(server_paths);
        true
    }

    /// Close the dialog and return the paths to send to the server
    pub fn save(&mut self) -> Vec<String> {
        self.close();
        let paths = self.paths();
        tracing::info!(count = paths.len(), "Saving look-in folders");
        paths
    }

    pub fn paths(&self) -> Vec<String> {
        self.options.iter().map(|o| o.path.clone()).collect()
    }

    pub fn options(&self) -> &[FolderOption] {
        &self.options
    }
}

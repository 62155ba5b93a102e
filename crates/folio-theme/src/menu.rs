//! Theme dropdown menu

use serde::Serialize;

use crate::error::ThemeError;
use crate::palette::{Palette, PaletteTable};
use crate::Result;

/// Number of palettes listed by name
pub const MENU_SIZE: usize = 6;

/// Id of the entry that applies a random palette
pub const RANDOM_ENTRY_ID: &str = "thm-RR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    pub swatch: String,
    /// Palette applied when the entry is chosen
    pub palette_id: String,
    pub active: bool,
}

impl MenuEntry {
    fn for_palette(palette: &Palette) -> Self {
        Self {
            id: palette.id.clone(),
            label: palette.name.clone(),
            swatch: palette.swatch().to_string(),
            palette_id: palette.id.clone(),
            active: false,
        }
    }

    fn random(palette: &Palette) -> Self {
        Self {
            id: RANDOM_ENTRY_ID.to_string(),
            label: format!("Random: {}", palette.name),
            swatch: palette.swatch().to_string(),
            palette_id: palette.id.clone(),
            active: false,
        }
    }

    pub fn is_random(&self) -> bool {
        self.id == RANDOM_ENTRY_ID
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeMenu {
    entries: Vec<MenuEntry>,
}

impl ThemeMenu {
    /// Build the menu: the first palettes of the table, then the random entry
    /// showing the palette at `random_index`
    pub fn build(table: &PaletteTable, random_index: usize) -> Result<Self> {
        let random = table.nth(random_index).ok_or(ThemeError::EmptyTable)?;

        let mut entries: Vec<MenuEntry> = table
            .iter()
            .take(MENU_SIZE)
            .map(MenuEntry::for_palette)
            .collect();
        entries.push(MenuEntry::random(random));

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn random_entry(&self) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.is_random())
    }

    /// Point the random entry at another palette
    pub(crate) fn reroll(&mut self, palette: &Palette) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.is_random()) {
            let active = entry.active;
            *entry = MenuEntry::random(palette);
            entry.active = active;
        }
    }

    /// Mark one entry active and every other inactive
    pub(crate) fn set_active(&mut self, id: &str) -> bool {
        if self.entry(id).is_none() {
            return false;
        }
        for entry in &mut self.entries {
            entry.active = entry.id == id;
        }
        true
    }

    pub fn active(&self) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.active)
    }
}

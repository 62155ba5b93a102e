//! Applied theme: root style properties and menu selection

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ThemeError;
use crate::menu::{ThemeMenu, RANDOM_ENTRY_ID};
use crate::palette::{Palette, PaletteTable, TextColors};
use crate::Result;

/// Which text colour property a colour control drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    Light,
    Dark,
}

impl TextTone {
    pub fn property(&self) -> &'static str {
        match self {
            TextTone::Light => "--text-color-light",
            TextTone::Dark => "--text-color-dark",
        }
    }
}

pub struct ThemeState {
    palettes: PaletteTable,
    text_colors: TextColors,
    menu: ThemeMenu,
    /// Custom properties set on the document root
    root_style: BTreeMap<String, String>,
}

impl ThemeState {
    pub fn new<R: Rng>(
        palettes: PaletteTable,
        text_colors: TextColors,
        rng: &mut R,
    ) -> Result<Self> {
        if palettes.is_empty() {
            return Err(ThemeError::EmptyTable);
        }
        let menu = ThemeMenu::build(&palettes, rng.gen_range(0..palettes.len()))?;

        tracing::debug!(palettes = palettes.len(), "Theme menu built");

        Ok(Self {
            palettes,
            text_colors,
            menu,
            root_style: BTreeMap::new(),
        })
    }

    /// Apply the palette behind a menu entry
    pub fn apply_palette(&mut self, entry_id: &str) -> Result<()> {
        let palette_id = self
            .menu
            .entry(entry_id)
            .map(|e| e.palette_id.clone())
            .ok_or_else(|| ThemeError::UnknownPalette(entry_id.to_string()))?;
        let palette = self
            .palettes
            .get(&palette_id)
            .cloned()
            .ok_or(ThemeError::UnknownPalette(palette_id))?;

        self.write_properties(&palette);
        self.menu.set_active(entry_id);

        tracing::info!(entry = %entry_id, palette = %palette.id, "Palette applied");
        Ok(())
    }

    /// Pick a palette at random, show it on the random entry and apply it
    pub fn apply_random<R: Rng>(&mut self, rng: &mut R) -> Result<&str> {
        let index = rng.gen_range(0..self.palettes.len());
        let palette = self
            .palettes
            .nth(index)
            .cloned()
            .ok_or(ThemeError::EmptyTable)?;

        self.menu.reroll(&palette);
        self.write_properties(&palette);
        self.menu.set_active(RANDOM_ENTRY_ID);

        tracing::info!(palette = %palette.id, "Random palette applied");
        Ok(self
            .menu
            .random_entry()
            .map(|e| e.palette_id.as_str())
            .unwrap_or_default())
    }

    pub fn set_text_color(&mut self, tone: TextTone, key: &str) -> Result<()> {
        let color = self
            .text_colors
            .get(key)
            .ok_or_else(|| ThemeError::UnknownTextColor(key.to_string()))?;

        self.root_style
            .insert(tone.property().to_string(), color.to_string());
        tracing::debug!(property = tone.property(), color = %color, "Text color set");
        Ok(())
    }

    fn write_properties(&mut self, palette: &Palette) {
        for (property, value) in &palette.properties {
            self.root_style.insert(property.clone(), value.clone());
        }
    }

    pub fn menu(&self) -> &ThemeMenu {
        &self.menu
    }

    pub fn palettes(&self) -> &PaletteTable {
        &self.palettes
    }

    pub fn text_colors(&self) -> &TextColors {
        &self.text_colors
    }

    pub fn root_style(&self) -> &BTreeMap<String, String> {
        &self.root_style
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.root_style.get(name).map(String::as_str)
    }
}

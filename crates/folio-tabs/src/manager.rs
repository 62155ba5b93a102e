//! Tab Manager
//!
//! Registry of open filings keyed by [`FilingKey`]. Owns the ordered tab
//! strip, the frames and selectors materialized for each tab, and the page
//! title region that reflects the active tab.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TabError;
use crate::frame::{DocumentVariant, Frame, Selector};
use crate::key::FilingKey;
use crate::tab::{CardRef, NavTab};
use crate::Result;

/// Tabs skipped per scroll step of the strip
const STRIP_SCROLL_STEP: usize = 2;

/// Result of [`TabManager::open_card`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Opened {
    /// A tab for the card already existed and was brought into focus
    Reused,
    /// A new tab was appended to the strip
    Created,
}

/// Result of [`TabManager::show_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shown {
    /// The frame already existed and was made visible
    Existing,
    /// Frame and selector were created for the tab
    Materialized,
}

/// Where activation went after [`TabManager::destroy_tab`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum Focus {
    /// The destroyed tab was not active; nothing moved
    Unchanged,
    Next(FilingKey),
    Previous(FilingKey),
    /// No tabs remain; the "no selection" placeholder is shown
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Page title area above the frames
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleRegion {
    pub visible: bool,
    pub main: String,
    pub form: String,
    /// "No filing selected" placeholder
    pub placeholder_visible: bool,
}

impl Default for TitleRegion {
    fn default() -> Self {
        Self {
            visible: false,
            main: String::new(),
            form: String::new(),
            placeholder_visible: true,
        }
    }
}

impl TitleRegion {
    fn show(&mut self, main: &str, form: &str) {
        self.main = main.to_string();
        self.form = form.to_string();
        self.visible = true;
        self.placeholder_visible = false;
    }

    fn clear(&mut self) {
        self.main.clear();
        self.form.clear();
        self.visible = false;
    }
}

#[derive(Debug, Default)]
pub struct TabManager {
    /// Tab order as displayed in the strip
    strip: Vec<FilingKey>,
    tabs: HashMap<FilingKey, NavTab>,
    frames: HashMap<FilingKey, Frame>,
    selectors: HashMap<FilingKey, Selector>,
    title: TitleRegion,
    /// Index of the first tab scrolled into view
    scroll_offset: usize,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the document of a card, reusing its tab when one exists
    pub fn open_card(&mut self, card: &CardRef, link: &str) -> Result<Opened> {
        if self.tabs.contains_key(&card.key) {
            self.show_frame(&card.key)?;
            tracing::debug!(nav_id = %card.key.nav_id(), "Reused open filing tab");
            return Ok(Opened::Reused);
        }

        let tab = NavTab::new(card, link)?;
        tracing::info!(nav_id = %tab.id, link = %tab.link, "Opened filing tab");

        self.strip.push(card.key.clone());
        self.tabs.insert(card.key.clone(), tab);
        self.scroll_offset = self.strip.len() - 1;

        self.show_frame(&card.key)?;
        Ok(Opened::Created)
    }

    /// Make the tab's frame the only visible one, creating it on first show
    pub fn show_frame(&mut self, key: &FilingKey) -> Result<Shown> {
        let tab = self
            .tabs
            .get(key)
            .ok_or_else(|| TabError::NotFound(key.nav_id()))?;

        let shown = if self.frames.contains_key(key) {
            Shown::Existing
        } else {
            let selector = Selector::new(tab);
            let frame = Frame::new(tab.frame_id.clone(), selector.first_link().to_string());

            tracing::info!(
                frame_id = %frame.id,
                source = %frame.source,
                "Created frame and selector"
            );

            self.selectors.insert(key.clone(), selector);
            self.frames.insert(key.clone(), frame);
            Shown::Materialized
        };

        self.title.show(&tab.title_main, &tab.title_form);

        for (k, frame) in self.frames.iter_mut() {
            frame.visible = k == key;
        }
        for (k, selector) in self.selectors.iter_mut() {
            selector.visible = k == key;
        }
        for (k, tab) in self.tabs.iter_mut() {
            if k == key {
                tab.activate()?;
            } else {
                tab.blur()?;
            }
        }

        debug_assert!(self.is_consistent());
        Ok(shown)
    }

    /// Repoint an existing frame to a new document
    pub fn select_frame_type(&mut self, link: &str, frame_id: &str) -> Result<()> {
        if link.trim().is_empty() {
            return Err(TabError::InvalidLink(
                "Document link cannot be empty".to_string(),
            ));
        }

        let frame = self
            .frames
            .values_mut()
            .find(|f| f.id == frame_id)
            .ok_or_else(|| TabError::NotFound(frame_id.to_string()))?;

        frame.navigate(link);
        tracing::debug!(frame_id = %frame_id, link = %link, "Frame source changed");

        Ok(())
    }

    /// Pick one of the selector's fixed options for a tab's frame
    pub fn select_variant(&mut self, key: &FilingKey, variant: DocumentVariant) -> Result<String> {
        let selector = self
            .selectors
            .get_mut(key)
            .ok_or_else(|| TabError::NotFound(key.selector_id()))?;

        let link = selector
            .select(variant)
            .map(str::to_string)
            .ok_or_else(|| TabError::InvalidLink(variant.to_string()))?;
        let frame_id = selector.frame_id.clone();

        self.select_frame_type(&link, &frame_id)?;
        Ok(link)
    }

    /// Close a tab together with its frame and selector
    pub fn destroy_tab(&mut self, key: &FilingKey) -> Result<Focus> {
        let position = self
            .strip
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| TabError::NotFound(key.nav_id()))?;
        let mut tab = self
            .tabs
            .remove(key)
            .ok_or_else(|| TabError::NotFound(key.nav_id()))?;

        let was_active = tab.is_active();
        tab.close()?;

        self.frames.remove(key);
        self.selectors.remove(key);
        self.strip.remove(position);
        self.scroll_offset = self.scroll_offset.min(self.strip.len().saturating_sub(1));

        tracing::info!(nav_id = %tab.id, was_active, "Destroyed filing tab");

        if !was_active {
            debug_assert!(self.is_consistent());
            return Ok(Focus::Unchanged);
        }

        self.title.clear();

        let focus = if let Some(next) = self.strip.get(position).cloned() {
            self.show_frame(&next)?;
            Focus::Next(next)
        } else if let Some(previous) = position
            .checked_sub(1)
            .and_then(|i| self.strip.get(i))
            .cloned()
        {
            self.show_frame(&previous)?;
            Focus::Previous(previous)
        } else {
            self.title.placeholder_visible = true;
            Focus::Placeholder
        };

        debug_assert!(self.is_consistent());
        Ok(focus)
    }

    /// Move a tab to a new position in the strip
    pub fn move_tab(&mut self, key: &FilingKey, new_index: usize) -> Result<()> {
        let current = self
            .strip
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| TabError::NotFound(key.nav_id()))?;

        let key = self.strip.remove(current);
        let target = new_index.min(self.strip.len());
        self.strip.insert(target, key);

        Ok(())
    }

    /// Scroll the strip by a fixed step; returns the new offset
    pub fn scroll_strip(&mut self, direction: ScrollDirection) -> usize {
        let max = self.strip.len().saturating_sub(1);
        self.scroll_offset = match direction {
            ScrollDirection::Forward => (self.scroll_offset + STRIP_SCROLL_STEP).min(max),
            ScrollDirection::Backward => self.scroll_offset.saturating_sub(STRIP_SCROLL_STEP),
        };
        self.scroll_offset
    }

    /// Find the filing owning a card, tab, frame or selector id
    pub fn resolve(&self, id: &str) -> Option<FilingKey> {
        self.strip.iter().find(|k| k.owns_id(id)).cloned()
    }

    /// Tabs in strip order
    pub fn tabs(&self) -> Vec<&NavTab> {
        self.strip.iter().filter_map(|k| self.tabs.get(k)).collect()
    }

    pub fn tab(&self, key: &FilingKey) -> Option<&NavTab> {
        self.tabs.get(key)
    }

    pub fn frame(&self, key: &FilingKey) -> Option<&Frame> {
        self.frames.get(key)
    }

    pub fn selector(&self, key: &FilingKey) -> Option<&Selector> {
        self.selectors.get(key)
    }

    pub fn active_tab(&self) -> Option<&NavTab> {
        self.tabs.values().find(|t| t.is_active())
    }

    pub fn visible_frame(&self) -> Option<&Frame> {
        self.frames.values().find(|f| f.visible)
    }

    pub fn visible_frame_count(&self) -> usize {
        self.frames.values().filter(|f| f.visible).count()
    }

    pub fn title(&self) -> &TitleRegion {
        &self.title
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn len(&self) -> usize {
        self.strip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
    }

    /// Every open tab has exactly one frame and selector, at most one tab is
    /// active, and a frame is visible iff its tab is the active one
    pub fn is_consistent(&self) -> bool {
        let triples = self.strip.len() == self.tabs.len()
            && self.tabs.len() == self.frames.len()
            && self.frames.len() == self.selectors.len()
            && self.strip.iter().all(|k| {
                self.tabs.contains_key(k)
                    && self.frames.contains_key(k)
                    && self.selectors.contains_key(k)
            });

        let active = self.tabs.values().filter(|t| t.is_active()).count();
        let visibility = self
            .frames
            .iter()
            .all(|(k, f)| f.visible == self.tabs.get(k).is_some_and(NavTab::is_active));

        triples && active <= 1 && visibility
    }
}

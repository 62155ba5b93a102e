//! Viewer state container
//!
//! Everything the page shows lives here: the card deck on the home section,
//! the tab strip with its frames on the filings section, the theme, the
//! look-in folder dialog and the dropdown menus. Network results are handed
//! in by the caller; the viewer never blocks on I/O.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use folio_cards::{edgar_link, Card, CardDeck, FilingListing, SortKey};
use folio_folders::{DialogSession, FolderDialog, Picked};
use folio_tabs::{
    DocumentVariant, FilingKey, Focus, Opened, ScrollDirection, Shown, TabError, TabManager,
};
use folio_theme::{PaletteTable, TextColors, TextTone, ThemeState};

use crate::config::Config;
use crate::error::CoreError;
use crate::menu::{InputEvent, MenuState};
use crate::Result;

/// Main page section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Card overview
    #[default]
    Home,
    /// Open filings
    Filings,
}

/// State of the refresh control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshIndicator {
    #[default]
    Idle,
    /// A listing request is in flight
    Spinning,
    /// The look-in folders changed since the last listing
    Updatable,
}

/// Identifies one listing request; only the latest is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTicket(u64);

pub struct Viewer {
    config: Config,
    tabs: TabManager,
    deck: CardDeck,
    /// Built once palettes arrive from the server
    theme: Option<ThemeState>,
    folders: FolderDialog,
    menus: MenuState,
    section: Section,
    refresh: RefreshIndicator,
    refresh_generation: u64,
    rng: StdRng,
}

impl Viewer {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        Self {
            config,
            tabs: TabManager::new(),
            deck: CardDeck::new(),
            theme: None,
            folders: FolderDialog::new(),
            menus: MenuState::new(),
            section: Section::Home,
            refresh: RefreshIndicator::Idle,
            refresh_generation: 0,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Tabs ===

    /// Open the filing behind the card at `route` and switch to the filings section
    pub fn open_card(&mut self, route: &str) -> Result<Opened> {
        let card = self.deck.card(route)?;
        if !card.is_viewable() {
            return Err(CoreError::NotViewable(card.route.clone()));
        }
        let source = card.tab_source();
        let link = card.link.clone();

        self.section = Section::Filings;
        Ok(self.tabs.open_card(&source, &link)?)
    }

    /// Focus the tab owning `id` (card, tab, frame or selector id)
    pub fn show_frame(&mut self, id: &str) -> Result<Shown> {
        let key = self.resolve(id)?;
        self.section = Section::Filings;
        Ok(self.tabs.show_frame(&key)?)
    }

    pub fn select_frame_type(&mut self, link: &str, frame_id: &str) -> Result<()> {
        Ok(self.tabs.select_frame_type(link, frame_id)?)
    }

    pub fn select_variant(&mut self, id: &str, variant: DocumentVariant) -> Result<String> {
        let key = self.resolve(id)?;
        Ok(self.tabs.select_variant(&key, variant)?)
    }

    pub fn destroy_tab(&mut self, id: &str) -> Result<Focus> {
        let key = self.resolve(id)?;
        Ok(self.tabs.destroy_tab(&key)?)
    }

    pub fn move_tab(&mut self, id: &str, index: usize) -> Result<()> {
        let key = self.resolve(id)?;
        Ok(self.tabs.move_tab(&key, index)?)
    }

    pub fn scroll_strip(&mut self, direction: ScrollDirection) -> usize {
        self.tabs.scroll_strip(direction)
    }

    fn resolve(&self, id: &str) -> Result<FilingKey> {
        self.tabs
            .resolve(id)
            .ok_or_else(|| TabError::NotFound(id.to_string()).into())
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    // === Sections ===

    pub fn select_section(&mut self, section: Section) {
        self.section = section;
    }

    pub fn section(&self) -> Section {
        self.section
    }

    // === Cards ===

    /// Start a listing request; the indicator spins until it is applied
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.refresh_generation += 1;
        self.refresh = RefreshIndicator::Spinning;
        tracing::debug!(generation = self.refresh_generation, "Refreshing filings");
        RefreshTicket(self.refresh_generation)
    }

    /// Apply a listing; false when a newer request superseded this one
    pub fn finish_refresh(&mut self, ticket: RefreshTicket, listing: &FilingListing) -> bool {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.0,
                current = self.refresh_generation,
                "Dropping stale filings listing"
            );
            return false;
        }

        self.deck.load(listing);
        self.refresh = RefreshIndicator::Idle;
        true
    }

    /// Stop the indicator after a failed listing request
    pub fn fail_refresh(&mut self, ticket: RefreshTicket, error: &CoreError) {
        if self.is_current(ticket) {
            tracing::warn!(error = %error, "Refreshing filings failed");
            self.refresh = RefreshIndicator::Idle;
        }
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.refresh_generation
    }

    pub fn refresh_indicator(&self) -> RefreshIndicator {
        self.refresh
    }

    /// Multi-term search over the cards; shows the home section
    pub fn search(&mut self, query: &str) -> usize {
        self.section = Section::Home;
        self.deck.search_terms(query)
    }

    /// Single-string filter as typed into the filter box
    pub fn filter(&mut self, query: &str) -> usize {
        self.deck.search(query)
    }

    pub fn sort(&mut self, key: SortKey) {
        self.deck.sort(key);
    }

    pub fn edgar_link(&self, route: &str) -> Result<String> {
        Ok(edgar_link(self.deck.card(route)?))
    }

    pub fn card(&self, route: &str) -> Result<&Card> {
        Ok(self.deck.card(route)?)
    }

    pub fn deck(&self) -> &CardDeck {
        &self.deck
    }

    // === Theme ===

    /// Build the theme menu and apply the configured default palette
    pub fn load_theme(&mut self, palettes: PaletteTable, text_colors: TextColors) -> Result<()> {
        let mut theme = ThemeState::new(palettes, text_colors, &mut self.rng)?;

        if let Some(default) = &self.config.default_palette {
            if let Err(e) = theme.apply_palette(default) {
                tracing::warn!(palette = %default, error = %e, "Default palette not applied");
            }
        }

        self.theme = Some(theme);
        Ok(())
    }

    pub fn apply_palette(&mut self, entry_id: &str) -> Result<()> {
        Ok(self.theme_mut()?.apply_palette(entry_id)?)
    }

    pub fn apply_random_palette(&mut self) -> Result<String> {
        let theme = self.theme.as_mut().ok_or(CoreError::ThemeNotLoaded)?;
        Ok(theme.apply_random(&mut self.rng)?.to_string())
    }

    pub fn set_text_color(&mut self, tone: TextTone, key: &str) -> Result<()> {
        Ok(self.theme_mut()?.set_text_color(tone, key)?)
    }

    pub fn theme(&self) -> Result<&ThemeState> {
        self.theme.as_ref().ok_or(CoreError::ThemeNotLoaded)
    }

    fn theme_mut(&mut self) -> Result<&mut ThemeState> {
        self.theme.as_mut().ok_or(CoreError::ThemeNotLoaded)
    }

    // === Look-in folders ===

    pub fn load_folders(&mut self, paths: Vec<String>) {
        self.folders.populate(paths);
    }

    pub fn open_folder_dialog(&mut self) {
        self.folders.open();
    }

    pub fn pick_folder(&mut self, path: &str) -> Picked {
        self.folders.add_picked(path)
    }

    pub fn select_folders(&mut self, paths: &[String]) {
        self.folders.select(paths);
    }

    pub fn remove_folders(&mut self, selected_only: bool) -> usize {
        self.folders.remove(selected_only)
    }

    /// Close the dialog without saving; the list is reset once the server's
    /// paths arrive through [`Viewer::reset_folders`]
    pub fn cancel_folder_dialog(&mut self) -> DialogSession {
        self.folders.cancel()
    }

    /// Apply the server's list for a cancelled dialog; false when it was
    /// reopened meanwhile
    pub fn reset_folders(&mut self, session: DialogSession, server_paths: Vec<String>) -> bool {
        self.folders.reset(session, server_paths)
    }

    /// Close the dialog and return the paths to post to the server
    pub fn save_folders(&mut self) -> Vec<String> {
        self.folders.save()
    }

    /// Record the server's answer to a folder change
    pub fn folders_saved(&mut self, changed: bool) {
        if changed {
            self.refresh = RefreshIndicator::Updatable;
            tracing::info!("Look-in folders changed; listing is out of date");
        }
    }

    pub fn folders(&self) -> &FolderDialog {
        &self.folders
    }

    // === Menus ===

    pub fn handle_input(&mut self, event: &InputEvent) {
        self.menus.handle(event);
    }

    pub fn menus(&self) -> &MenuState {
        &self.menus
    }
}

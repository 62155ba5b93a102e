//! Theme commands
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::task::JoinHandle;

use folio_core::{MenuEntry, TextColors, TextTone, ThemeState};

use super::CommandResult;
use crate::state::{AppState, Event};

#[derive(Debug, Serialize)]
pub struct ThemeInfo {
    pub entries: Vec<MenuEntry>,
    pub root_style: BTreeMap<String, String>,
}

impl From<&ThemeState> for ThemeInfo {
    fn from(theme: &ThemeState) -> Self {
        Self {
            entries: theme.menu().entries().to_vec(),
            root_style: theme.root_style().clone(),
        }
    }
}

/// Fetch palettes, then text colours, and build the theme menu
pub(crate) fn spawn_load_theme(state: &AppState) -> JoinHandle<()> {
    let state = state.clone();

    tokio::spawn(async move {
        let (palettes_path, text_colors_path) = match state.with_viewer(|viewer| {
            let config = viewer.config();
            Ok((config.palettes_path.clone(), config.text_colors_path.clone()))
        }) {
            Ok(paths) => paths,
            Err(_) => return,
        };

        let palettes = match state.client().palettes(&palettes_path).await {
            Ok(palettes) => palettes,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load palettes");
                state.emit(Event::RequestFailed {
                    request: "palettes".to_string(),
                    error: e.to_string(),
                });
                return;
            }
        };

        let text_colors = match state.client().text_colors(&text_colors_path).await {
            Ok(colors) => colors,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load text colors");
                TextColors::default()
            }
        };

        let count = palettes.len();
        match state.with_viewer_mut(|viewer| viewer.load_theme(palettes, text_colors)) {
            Ok(()) => state.emit(Event::ThemeLoaded { palettes: count }),
            Err(e) => tracing::warn!(error = %e, "Theme not loaded"),
        }
    })
}

pub fn get_theme_menu(state: &AppState) -> CommandResult<ThemeInfo> {
    match state.with_viewer(|viewer| Ok(ThemeInfo::from(viewer.theme()?))) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn apply_palette(state: &AppState, id: String) -> CommandResult<ThemeInfo> {
    match state.with_viewer_mut(|viewer| {
        viewer.apply_palette(&id)?;
        Ok(ThemeInfo::from(viewer.theme()?))
    }) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn apply_random_palette(state: &AppState) -> CommandResult<ThemeInfo> {
    match state.with_viewer_mut(|viewer| {
        viewer.apply_random_palette()?;
        Ok(ThemeInfo::from(viewer.theme()?))
    }) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn set_text_color(state: &AppState, tone: TextTone, key: String) -> CommandResult<ThemeInfo> {
    match state.with_viewer_mut(|viewer| {
        viewer.set_text_color(tone, &key)?;
        Ok(ThemeInfo::from(viewer.theme()?))
    }) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

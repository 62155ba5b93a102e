//! Tab management commands
use serde::{Deserialize, Serialize};

use folio_core::{
    DocumentVariant, Focus, Frame, NavTab, Opened, RefreshIndicator, ScrollDirection, Section,
    Selector, TitleRegion, Viewer,
};

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: String,
    pub card_id: String,
    pub label: String,
    pub frame_id: String,
    pub selector_id: String,
    pub link: String,
    pub state: String,
    pub is_active: bool,
}

impl From<&NavTab> for TabInfo {
    fn from(tab: &NavTab) -> Self {
        Self {
            id: tab.id.clone(),
            card_id: tab.key.card_id(),
            label: tab.label.clone(),
            frame_id: tab.frame_id.clone(),
            selector_id: tab.selector_id.clone(),
            link: tab.link.clone(),
            state: tab.state.as_str().to_string(),
            is_active: tab.is_active(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OpenCardInfo {
    pub outcome: Opened,
    pub tab: TabInfo,
}

/// Everything the page currently shows
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub section: Section,
    pub title: TitleRegion,
    pub tabs: Vec<TabInfo>,
    pub frames: Vec<Frame>,
    pub selectors: Vec<Selector>,
    pub scroll_offset: usize,
    pub refresh: RefreshIndicator,
    pub visible_cards: usize,
    pub open_menus: Vec<String>,
    pub folder_dialog_open: bool,
}

impl From<&Viewer> for PageInfo {
    fn from(viewer: &Viewer) -> Self {
        let manager = viewer.tabs();
        let ordered = manager.tabs();

        Self {
            section: viewer.section(),
            title: manager.title().clone(),
            tabs: ordered.iter().map(|tab| TabInfo::from(*tab)).collect(),
            frames: ordered
                .iter()
                .filter_map(|tab| manager.frame(&tab.key).cloned())
                .collect(),
            selectors: ordered
                .iter()
                .filter_map(|tab| manager.selector(&tab.key).cloned())
                .collect(),
            scroll_offset: manager.scroll_offset(),
            refresh: viewer.refresh_indicator(),
            visible_cards: viewer.deck().visible_count(),
            open_menus: viewer.menus().open_menus().map(str::to_string).collect(),
            folder_dialog_open: viewer.folders().is_open(),
        }
    }
}

pub fn open_card(state: &AppState, route: String) -> CommandResult<OpenCardInfo> {
    let result = state.with_viewer_mut(|viewer| {
        let outcome = viewer.open_card(&route)?;
        let tab = viewer
            .tabs()
            .active_tab()
            .map(TabInfo::from)
            .ok_or_else(|| folio_core::TabError::NotFound(route.clone()))?;
        Ok(OpenCardInfo { outcome, tab })
    });

    match result {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn show_frame(state: &AppState, id: String) -> CommandResult<PageInfo> {
    match state.with_viewer_mut(|viewer| {
        viewer.show_frame(&id)?;
        Ok(PageInfo::from(&*viewer))
    }) {
        Ok(page) => CommandResult::ok(page),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn select_frame_type(state: &AppState, link: String, frame_id: String) -> CommandResult<()> {
    match state.with_viewer_mut(|viewer| viewer.select_frame_type(&link, &frame_id)) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn select_document_variant(
    state: &AppState,
    id: String,
    variant: DocumentVariant,
) -> CommandResult<String> {
    match state.with_viewer_mut(|viewer| viewer.select_variant(&id, variant)) {
        Ok(link) => CommandResult::ok(link),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn destroy_tab(state: &AppState, id: String) -> CommandResult<Focus> {
    match state.with_viewer_mut(|viewer| viewer.destroy_tab(&id)) {
        Ok(focus) => CommandResult::ok(focus),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn move_tab(state: &AppState, id: String, index: usize) -> CommandResult<Vec<TabInfo>> {
    match state.with_viewer_mut(|viewer| {
        viewer.move_tab(&id, index)?;
        Ok(tab_list(viewer))
    }) {
        Ok(tabs) => CommandResult::ok(tabs),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn scroll_strip(state: &AppState, direction: ScrollDirection) -> CommandResult<usize> {
    match state.with_viewer_mut(|viewer| Ok(viewer.scroll_strip(direction))) {
        Ok(offset) => CommandResult::ok(offset),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn get_tabs(state: &AppState) -> CommandResult<Vec<TabInfo>> {
    match state.with_viewer(|viewer| Ok(tab_list(viewer))) {
        Ok(tabs) => CommandResult::ok(tabs),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn get_page(state: &AppState) -> CommandResult<PageInfo> {
    match state.with_viewer(|viewer| Ok(PageInfo::from(viewer))) {
        Ok(page) => CommandResult::ok(page),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn select_section(state: &AppState, section: Section) -> CommandResult<Section> {
    match state.with_viewer_mut(|viewer| {
        viewer.select_section(section);
        Ok(viewer.section())
    }) {
        Ok(section) => CommandResult::ok(section),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

fn tab_list(viewer: &Viewer) -> Vec<TabInfo> {
    viewer
        .tabs()
        .tabs()
        .into_iter()
        .map(TabInfo::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{card_id, load_listing, state};

    #[test]
    fn test_open_and_reopen_card() {
        let (state, _rx) = state();
        load_listing(&state);

        let first = open_card(&state, "acme_2020".to_string()).data.unwrap();
        assert_eq!(first.outcome, Opened::Created);
        assert_eq!(first.tab.label, "Acme Corp (FY2020)");
        assert!(first.tab.is_active);

        let second = open_card(&state, "acme_2020".to_string()).data.unwrap();
        assert_eq!(second.outcome, Opened::Reused);
        assert_eq!(get_tabs(&state).data.unwrap().len(), 1);
    }

    #[test]
    fn test_page_snapshot() {
        let (state, _rx) = state();
        load_listing(&state);
        let acme = card_id(&state, "acme_2020");
        open_card(&state, "acme_2020".to_string());
        open_card(&state, "beta_2020".to_string());

        let page = get_page(&state).data.unwrap();
        assert_eq!(page.section, Section::Filings);
        assert_eq!(page.tabs.len(), 2);
        assert_eq!(page.frames.iter().filter(|f| f.visible).count(), 1);
        assert_eq!(page.selectors.iter().filter(|s| s.visible).count(), 1);
        assert!(page.title.visible);
        assert_eq!(page.title.main, "Beta Inc");

        let page = show_frame(&state, format!("{}-nav", acme)).data.unwrap();
        assert_eq!(page.title.main, "Acme Corp");
        assert!(page.frames[0].visible);
    }

    #[test]
    fn test_destroy_only_tab_shows_placeholder() {
        let (state, _rx) = state();
        load_listing(&state);
        let acme = card_id(&state, "acme_2020");
        open_card(&state, "acme_2020".to_string());

        let focus = destroy_tab(&state, format!("{}-nav", acme)).data.unwrap();
        assert_eq!(focus, Focus::Placeholder);

        let page = get_page(&state).data.unwrap();
        assert!(page.frames.is_empty());
        assert!(page.title.placeholder_visible);
        assert!(!page.title.visible);
    }

    #[test]
    fn test_select_document_variant() {
        let (state, _rx) = state();
        load_listing(&state);
        let acme = card_id(&state, "acme_2020");
        open_card(&state, "acme_2020".to_string());

        let link = select_document_variant(
            &state,
            format!("{}-selector", acme),
            DocumentVariant::FilingSummary,
        )
        .data
        .unwrap();
        assert_eq!(link, "/filing/acme_2020/FilingSummary.htm");

        let result = select_frame_type(&state, String::new(), format!("{}-frame", acme));
        assert!(!result.success);
    }

    #[test]
    fn test_move_and_scroll() {
        let (state, _rx) = state();
        load_listing(&state);
        let acme = card_id(&state, "acme_2020");
        open_card(&state, "acme_2020".to_string());
        open_card(&state, "beta_2020".to_string());

        let tabs = move_tab(&state, acme.clone(), 5).data.unwrap();
        assert_eq!(tabs[1].card_id, acme);

        assert_eq!(scroll_strip(&state, ScrollDirection::Backward).data, Some(0));
        assert_eq!(scroll_strip(&state, ScrollDirection::Forward).data, Some(1));
    }

    #[test]
    fn test_commands_after_shutdown() {
        let (state, _rx) = state();
        state.shutdown();
        let result = get_tabs(&state);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Viewer not initialized"));
    }
}

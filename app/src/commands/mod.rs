//! Frontend commands
//!
//! Each request line is `{"id": .., "command": "<name>", "args": {..}}`; the
//! reply echoes the id next to the [`CommandResult`] fields.

pub mod cards;
pub mod folders;
pub mod menus;
pub mod tabs;
pub mod theme;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use folio_core::{DocumentVariant, InputEvent, ScrollDirection, Section, SortKey, TextTone};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> CommandResult<T> {
    fn into_json(self) -> CommandResult<Value> {
        match self.data.map(serde_json::to_value) {
            Some(Ok(value)) => CommandResult::ok(value),
            Some(Err(e)) => CommandResult::err(e.to_string()),
            None => CommandResult {
                success: self.success,
                data: None,
                error: self.error,
            },
        }
    }
}

/// How `search_cards` interprets its query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Every whitespace-separated term must match
    #[default]
    Terms,
    /// The whole query must appear in one field
    Phrase,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum Invocation {
    // Tabs
    OpenCard {
        route: String,
    },
    ShowFrame {
        id: String,
    },
    SelectFrameType {
        link: String,
        frame_id: String,
    },
    SelectDocumentVariant {
        id: String,
        variant: DocumentVariant,
    },
    DestroyTab {
        id: String,
    },
    MoveTab {
        id: String,
        index: usize,
    },
    ScrollStrip {
        direction: ScrollDirection,
    },
    GetTabs,
    GetPage,
    SelectSection {
        section: Section,
    },
    // Cards
    RefreshCards,
    GetCards,
    SearchCards {
        query: String,
        #[serde(default)]
        mode: SearchMode,
    },
    SortCards {
        key: SortKey,
    },
    EdgarLink {
        route: String,
    },
    // Theme
    GetThemeMenu,
    ApplyPalette {
        id: String,
    },
    ApplyRandomPalette,
    SetTextColor {
        tone: TextTone,
        key: String,
    },
    // Look-in folders
    OpenFolderDialog,
    PickFolder,
    RemoveFolders {
        #[serde(default)]
        selected: Option<Vec<String>>,
        #[serde(default = "default_true")]
        selected_only: bool,
    },
    CancelFolderDialog,
    SaveFolders,
    GetFolders,
    // Menus
    HandleInput {
        event: InputEvent,
    },
}

fn default_true() -> bool {
    true
}

/// Run one command against the viewer
pub fn dispatch(state: &AppState, invocation: Invocation) -> CommandResult<Value> {
    match invocation {
        Invocation::OpenCard { route } => tabs::open_card(state, route).into_json(),
        Invocation::ShowFrame { id } => tabs::show_frame(state, id).into_json(),
        Invocation::SelectFrameType { link, frame_id } => {
            tabs::select_frame_type(state, link, frame_id).into_json()
        }
        Invocation::SelectDocumentVariant { id, variant } => {
            tabs::select_document_variant(state, id, variant).into_json()
        }
        Invocation::DestroyTab { id } => tabs::destroy_tab(state, id).into_json(),
        Invocation::MoveTab { id, index } => tabs::move_tab(state, id, index).into_json(),
        Invocation::ScrollStrip { direction } => tabs::scroll_strip(state, direction).into_json(),
        Invocation::GetTabs => tabs::get_tabs(state).into_json(),
        Invocation::GetPage => tabs::get_page(state).into_json(),
        Invocation::SelectSection { section } => tabs::select_section(state, section).into_json(),
        Invocation::RefreshCards => cards::refresh_cards(state).into_json(),
        Invocation::GetCards => cards::get_cards(state).into_json(),
        Invocation::SearchCards { query, mode } => {
            cards::search_cards(state, query, mode).into_json()
        }
        Invocation::SortCards { key } => cards::sort_cards(state, key).into_json(),
        Invocation::EdgarLink { route } => cards::edgar_link(state, route).into_json(),
        Invocation::GetThemeMenu => theme::get_theme_menu(state).into_json(),
        Invocation::ApplyPalette { id } => theme::apply_palette(state, id).into_json(),
        Invocation::ApplyRandomPalette => theme::apply_random_palette(state).into_json(),
        Invocation::SetTextColor { tone, key } => {
            theme::set_text_color(state, tone, key).into_json()
        }
        Invocation::OpenFolderDialog => folders::open_folder_dialog(state).into_json(),
        Invocation::PickFolder => folders::pick_folder(state).into_json(),
        Invocation::RemoveFolders {
            selected,
            selected_only,
        } => folders::remove_folders(state, selected, selected_only).into_json(),
        Invocation::CancelFolderDialog => folders::cancel_folder_dialog(state).into_json(),
        Invocation::SaveFolders => folders::save_folders(state).into_json(),
        Invocation::GetFolders => folders::get_folders(state).into_json(),
        Invocation::HandleInput { event } => menus::handle_input(state, event).into_json(),
    }
}

#[derive(Debug, Serialize)]
struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(flatten)]
    result: CommandResult<Value>,
}

/// Parse a request line, run it and render the reply line
pub fn handle_line(state: &AppState, line: &str) -> String {
    let (id, result) = match parse_request(line) {
        Ok((id, invocation)) => (id, dispatch(state, invocation)),
        Err((id, e)) => (id, CommandResult::err(format!("Invalid request: {}", e))),
    };

    let response = Response { id, result };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"data":null,"error":"Failed to serialize response: {}"}}"#,
            e
        )
    })
}

fn parse_request(
    line: &str,
) -> std::result::Result<(Option<Value>, Invocation), (Option<Value>, serde_json::Error)> {
    let mut value: Value = serde_json::from_str(line).map_err(|e| (None, e))?;
    let id = value.as_object_mut().and_then(|o| o.remove("id"));
    match serde_json::from_value(value) {
        Ok(invocation) => Ok((id, invocation)),
        Err(e) => Err((id, e)),
    }
}

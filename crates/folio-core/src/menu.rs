//! Dropdown menus and the input events that open and close them

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Key and pointer events routed to the dropdowns
///
/// `target` names the dropdown the event target toggles, if the target is a
/// dropdown control at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyUp {
        key: String,
        #[serde(default)]
        target: Option<String>,
    },
    MouseUp {
        #[serde(default)]
        target: Option<String>,
    },
    Resize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MenuState {
    open: BTreeSet<String>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.open.remove(id) {
            self.open.insert(id.to_string());
        }
        self.is_open(id)
    }

    pub fn close_all(&mut self) {
        self.open.clear();
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    pub fn open_menus(&self) -> impl Iterator<Item = &str> {
        self.open.iter().map(String::as_str)
    }

    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyUp { key, target } => match (key.as_str(), target) {
                ("Escape", _) => self.close_all(),
                ("Enter", Some(id)) => {
                    self.toggle(id);
                }
                ("Enter", None) => {}
                (_, None) => self.close_all(),
                (_, Some(_)) => {}
            },
            InputEvent::MouseUp { target: Some(id) } => {
                self.toggle(id);
            }
            InputEvent::MouseUp { target: None } | InputEvent::Resize => self.close_all(),
        }
    }
}

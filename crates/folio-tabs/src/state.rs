//! Tab State Machine
//!
//! ```text
//! (closed)
//!   ↓ open
//! Inactive ⇄ Active
//!   ↓ destroy
//! Closed
//! ```
//!
//! Only one tab in the strip may be `Active` at a time; the manager enforces
//! that on every show.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    /// Tab is selected and its frame is the visible one
    Active,
    /// Tab is open in the strip but another tab (or none) is shown
    Inactive,
    /// Tab has been destroyed together with its frame and selector
    Closed,
}

impl TabState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: TabState) -> bool {
        match (self, target) {
            (TabState::Inactive, TabState::Active) => true,
            (TabState::Active, TabState::Inactive) => true,
            // Either open state can be closed
            (TabState::Active | TabState::Inactive, TabState::Closed) => true,
            // Closed is terminal
            (TabState::Closed, _) => false,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabState::Active => "active",
            TabState::Inactive => "inactive",
            TabState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TabState::Active),
            "inactive" => Ok(TabState::Inactive),
            "closed" => Ok(TabState::Closed),
            _ => Err(format!("Unknown tab state: {}", s)),
        }
    }
}

//! Navigation tab data structure
//!
//! A tab in the filings strip shows:
//! - Filer name with fiscal focus
//! - Active marker when its frame is the visible one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::key::FilingKey;
use crate::state::TabState;
use crate::Result;

/// What a tab needs to know about the card it was opened from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRef {
    pub key: FilingKey,
    /// Registrant name as displayed on the card
    pub filer: String,
    /// File name of the primary document inside the filing folder
    pub prime_doc: String,
    /// Whether the primary document can be opened in the inline viewer
    pub inline_xbrl: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavTab {
    pub key: FilingKey,
    /// `<card id>-nav`
    pub id: String,
    /// Frame shown by this tab
    pub frame_id: String,
    /// Selector paired with the frame
    pub selector_id: String,
    /// Text on the tab itself
    pub label: String,
    /// First line of the page title (filer)
    pub title_main: String,
    /// Second line of the page title (form and fiscal focus)
    pub title_form: String,
    /// Base link of the filing folder, e.g. `/filing/<route>`
    pub link: String,
    pub prime_doc: String,
    pub inline_xbrl: bool,
    pub state: TabState,
    pub opened_at: DateTime<Utc>,
    pub last_activated_at: Option<DateTime<Utc>>,
}

impl NavTab {
    pub fn new(card: &CardRef, link: &str) -> Result<Self> {
        let link = link.trim_end_matches('/');
        if link.is_empty() {
            return Err(TabError::InvalidLink(
                "Document link cannot be empty".to_string(),
            ));
        }

        let suffix = card.key.fiscal_suffix();

        Ok(Self {
            key: card.key.clone(),
            id: card.key.nav_id(),
            frame_id: card.key.frame_id(),
            selector_id: card.key.selector_id(),
            label: format!("{}{}", card.filer, suffix),
            title_main: card.filer.clone(),
            title_form: format!("{}{}", card.key.form.to_uppercase(), suffix),
            link: link.to_string(),
            prime_doc: card.prime_doc.clone(),
            inline_xbrl: card.inline_xbrl,
            state: TabState::Inactive,
            opened_at: Utc::now(),
            last_activated_at: None,
        })
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: TabState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(TabError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        if self.state != new_state {
            tracing::debug!(
                nav_id = %self.id,
                from = %self.state,
                to = %new_state,
                "Tab state transition"
            );
        }

        self.state = new_state;
        if new_state == TabState::Active {
            self.last_activated_at = Some(Utc::now());
        }

        Ok(())
    }

    pub fn activate(&mut self) -> Result<()> {
        self.transition_to(TabState::Active)
    }

    /// Move tab out of focus; no-op unless active
    pub fn blur(&mut self) -> Result<()> {
        if self.state == TabState::Active {
            self.transition_to(TabState::Inactive)
        } else {
            Ok(())
        }
    }

    pub fn close(&mut self) -> Result<()> {
        self.transition_to(TabState::Closed)
    }

    pub fn is_active(&self) -> bool {
        self.state == TabState::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardRef {
        CardRef {
            key: FilingKey::new("320193", "10-K", "FY", "2020"),
            filer: "Apple Inc. (AAPL)".to_string(),
            prime_doc: "aapl-20200926.htm".to_string(),
            inline_xbrl: true,
        }
    }

    #[test]
    fn test_new_tab() {
        let tab = NavTab::new(&card(), "/filing/aapl_2020/").unwrap();
        assert_eq!(tab.id, "32019310kfy2020-nav");
        assert_eq!(tab.frame_id, "32019310kfy2020-frame");
        assert_eq!(tab.selector_id, "32019310kfy2020-selector");
        assert_eq!(tab.label, "Apple Inc. (AAPL) (FY2020)");
        assert_eq!(tab.title_main, "Apple Inc. (AAPL)");
        assert_eq!(tab.title_form, "10-K (FY2020)");
        assert_eq!(tab.link, "/filing/aapl_2020");
        assert_eq!(tab.state, TabState::Inactive);
    }

    #[test]
    fn test_empty_link_rejected() {
        assert!(matches!(
            NavTab::new(&card(), ""),
            Err(TabError::InvalidLink(_))
        ));
    }

    #[test]
    fn test_state_transitions() {
        let mut tab = NavTab::new(&card(), "/filing/aapl_2020").unwrap();

        tab.activate().unwrap();
        assert!(tab.is_active());
        assert!(tab.last_activated_at.is_some());

        tab.blur().unwrap();
        assert_eq!(tab.state, TabState::Inactive);

        // Blurring an inactive tab is a no-op
        tab.blur().unwrap();
        assert_eq!(tab.state, TabState::Inactive);

        tab.close().unwrap();
        assert_eq!(tab.state, TabState::Closed);
        assert!(tab.activate().is_err());
    }
}

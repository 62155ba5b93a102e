//! Filing card commands
use serde::Serialize;
use tokio::task::JoinHandle;

use folio_core::{Card, CardField, RefreshIndicator, SortKey};

use super::{CommandResult, SearchMode};
use crate::state::{AppState, Event};

#[derive(Debug, Clone, Serialize)]
pub struct CardInfo {
    /// Listing route; addresses the card in commands
    pub route: String,
    /// Element id derived from the filing key, shared by same-key filings
    pub key_id: String,
    pub filer: String,
    pub cik: String,
    pub form: String,
    pub fiscal_period: String,
    pub fiscal_year: String,
    pub period_end: String,
    pub filing_date: String,
    pub inline_xbrl: bool,
    pub link: String,
    pub index_link: Option<String>,
    pub viewable: bool,
    pub fields: Vec<CardField>,
    pub visible: bool,
}

impl From<&Card> for CardInfo {
    fn from(card: &Card) -> Self {
        Self {
            route: card.route.clone(),
            key_id: card.id.clone(),
            filer: card.filer.clone(),
            cik: card.cik.clone(),
            form: card.form.clone(),
            fiscal_period: card.fiscal_period.clone(),
            fiscal_year: card.fiscal_year.clone(),
            period_end: card.period_end_text.clone(),
            filing_date: card.filing_date_text.clone(),
            inline_xbrl: card.inline_xbrl,
            link: card.link.clone(),
            index_link: card.index_link.clone(),
            viewable: card.is_viewable(),
            fields: card.fields.clone(),
            visible: card.visible,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardsInfo {
    pub cards: Vec<CardInfo>,
    pub visible: usize,
    pub refresh: RefreshIndicator,
}

#[derive(Debug, Serialize)]
pub struct SearchInfo {
    pub visible: usize,
    /// Ids of the matching cards, in display order
    pub matches: Vec<String>,
}

/// Ask the server to rescan; cards are replaced when the listing arrives
pub fn refresh_cards(state: &AppState) -> CommandResult<RefreshIndicator> {
    match spawn_refresh(state) {
        Ok(_) => CommandResult::ok(RefreshIndicator::Spinning),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub(crate) fn spawn_refresh(state: &AppState) -> folio_core::Result<JoinHandle<()>> {
    let ticket = state.with_viewer_mut(|viewer| Ok(viewer.begin_refresh()))?;
    let state = state.clone();

    Ok(tokio::spawn(async move {
        let result = state.client().list_filings().await;
        let applied = state.with_viewer_mut(|viewer| match result {
            Ok(listing) => Ok(viewer
                .finish_refresh(ticket, &listing)
                .then(|| viewer.deck().len())),
            Err(e) => {
                let e = folio_core::CoreError::from(e);
                viewer.fail_refresh(ticket, &e);
                Err(e)
            }
        });

        match applied {
            Ok(Some(count)) => state.emit(Event::CardsRefreshed { count }),
            Ok(None) => {}
            Err(folio_core::CoreError::NotInitialized) => {
                tracing::debug!("Viewer gone; dropping filings listing");
            }
            Err(e) => state.emit(Event::RefreshFailed {
                error: e.to_string(),
            }),
        }
    }))
}

pub fn get_cards(state: &AppState) -> CommandResult<CardsInfo> {
    match state.with_viewer(|viewer| {
        Ok(CardsInfo {
            cards: viewer.deck().cards().iter().map(CardInfo::from).collect(),
            visible: viewer.deck().visible_count(),
            refresh: viewer.refresh_indicator(),
        })
    }) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn search_cards(state: &AppState, query: String, mode: SearchMode) -> CommandResult<SearchInfo> {
    match state.with_viewer_mut(|viewer| {
        let visible = match mode {
            SearchMode::Terms => viewer.search(&query),
            SearchMode::Phrase => viewer.filter(&query),
        };
        let matches = viewer.deck().visible_cards().map(|c| c.route.clone()).collect();
        Ok(SearchInfo { visible, matches })
    }) {
        Ok(info) => CommandResult::ok(info),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Sort by a key; returns card routes in the new order
pub fn sort_cards(state: &AppState, key: SortKey) -> CommandResult<Vec<String>> {
    match state.with_viewer_mut(|viewer| {
        viewer.sort(key);
        Ok(viewer.deck().cards().iter().map(|c| c.route.clone()).collect())
    }) {
        Ok(order) => CommandResult::ok(order),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn edgar_link(state: &AppState, route: String) -> CommandResult<String> {
    match state.with_viewer(|viewer| viewer.edgar_link(&route)) {
        Ok(link) => CommandResult::ok(link),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{load_listing, state};

    #[test]
    fn test_get_cards_in_default_order() {
        let (state, _rx) = state();
        load_listing(&state);

        let info = get_cards(&state).data.unwrap();
        let routes: Vec<&str> = info.cards.iter().map(|c| c.route.as_str()).collect();
        assert_eq!(routes, vec!["acme_2020", "acme_2019", "beta_2020"]);
        assert_eq!(info.visible, 3);
        assert_eq!(info.refresh, RefreshIndicator::Idle);
    }

    #[test]
    fn test_search_modes() {
        let (state, _rx) = state();
        load_listing(&state);

        let info = search_cards(&state, "acme 2019".to_string(), SearchMode::Terms)
            .data
            .unwrap();
        assert_eq!(info.visible, 1);
        assert_eq!(info.matches, vec!["acme_2019"]);

        let info = search_cards(&state, "acme 2019".to_string(), SearchMode::Phrase)
            .data
            .unwrap();
        assert_eq!(info.visible, 0);
    }

    #[test]
    fn test_sort_twice_reverses() {
        let (state, _rx) = state();
        load_listing(&state);

        let first = sort_cards(&state, SortKey::Name).data.unwrap();
        let mut second = sort_cards(&state, SortKey::Name).data.unwrap();
        second.reverse();
        assert_eq!(first, second);
    }

    #[test]
    fn test_edgar_link() {
        let (state, _rx) = state();
        load_listing(&state);
        let link = edgar_link(&state, "beta_2020".to_string()).data.unwrap();
        assert!(link.contains("route=beta_2020"));

        assert!(!edgar_link(&state, "missing".to_string()).success);
    }

    #[tokio::test]
    async fn test_refresh_against_unreachable_server() {
        let (state, mut rx) = state();
        load_listing(&state);

        let handle = spawn_refresh(&state).unwrap();
        assert_eq!(
            get_cards(&state).data.unwrap().refresh,
            RefreshIndicator::Spinning
        );
        handle.await.unwrap();

        let info = get_cards(&state).data.unwrap();
        assert_eq!(info.refresh, RefreshIndicator::Idle);
        assert_eq!(info.cards.len(), 3);

        let line = rx.recv().await.unwrap();
        assert!(line.contains("refresh-failed"));
    }

    #[tokio::test]
    async fn test_refresh_after_shutdown_is_dropped() {
        let (state, mut rx) = state();
        let handle = spawn_refresh(&state).unwrap();
        state.shutdown();
        handle.await.unwrap();

        assert!(rx.try_recv().is_err());
    }
}

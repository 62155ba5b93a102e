//! Card deck: ordering, sorting and search

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::card::Card;
use crate::descriptor::FilingListing;
use crate::error::CardError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Period end date
    Date,
    /// Entity id, numerically
    Cik,
    Form,
    /// Filer name, case-insensitive
    Name,
}

impl SortKey {
    fn compare(&self, a: &Card, b: &Card) -> Ordering {
        match self {
            SortKey::Date => a.period_end.cmp(&b.period_end),
            SortKey::Cik => a.cik_number().cmp(&b.cik_number()),
            SortKey::Form => a.form.cmp(&b.form),
            SortKey::Name => a.filer.to_lowercase().cmp(&b.filer.to_lowercase()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Cik => "cik",
            SortKey::Form => "form",
            SortKey::Name => "name",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Default)]
pub struct CardDeck {
    /// Cards in display order
    cards: Vec<Card>,
    /// Sort controls whose next use reverses instead of sorting
    armed: HashSet<SortKey>,
}

impl CardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all cards with the given listing; returns the number loaded
    ///
    /// Entries that cannot form a card are skipped. Default order is by
    /// entity id, newest period first within an entity.
    pub fn load(&mut self, listing: &FilingListing) -> usize {
        let mut cards: Vec<Card> = listing
            .iter()
            .filter_map(|(route, descriptor)| match Card::from_descriptor(route, descriptor) {
                Ok(card) => Some(card),
                Err(e) => {
                    tracing::warn!(route = %route, error = %e, "Skipping filing");
                    None
                }
            })
            .collect();

        cards.sort_by(|a, b| {
            a.cik_number()
                .cmp(&b.cik_number())
                .then_with(|| b.period_end.cmp(&a.period_end))
        });

        self.cards = cards;
        tracing::info!(count = self.cards.len(), "Loaded filing cards");
        self.cards.len()
    }

    /// Sort by a key, or reverse the current order when that key was just used
    pub fn sort(&mut self, key: SortKey) {
        if self.armed.remove(&key) {
            self.cards.reverse();
        } else {
            self.cards.sort_by(|a, b| key.compare(a, b));
            self.armed.insert(key);
        }
        tracing::debug!(key = %key, "Sorted filing cards");
    }

    /// Show cards where any field contains the query
    pub fn search(&mut self, query: &str) -> usize {
        let filter = query.to_lowercase();
        for card in &mut self.cards {
            card.visible = card.matches(&filter);
        }
        self.visible_count()
    }

    /// Show cards matching every whitespace-separated term
    pub fn search_terms(&mut self, query: &str) -> usize {
        let filter = query.to_lowercase();
        let terms: Vec<&str> = filter.split_whitespace().collect();
        for card in &mut self.cards {
            card.visible = terms.iter().all(|t| card.matches(t));
        }
        self.visible_count()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_cards().count()
    }

    /// Look a card up by its listing route
    ///
    /// Routes are unique; element ids are not, since filings without a
    /// fiscal focus share the same key.
    pub fn card(&self, route: &str) -> Result<&Card> {
        self.cards
            .iter()
            .find(|c| c.route == route)
            .ok_or_else(|| CardError::NotFound(route.to_string()))
    }

    pub fn is_armed(&self, key: SortKey) -> bool {
        self.armed.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::descriptor;

    fn listing() -> FilingListing {
        let mut listing = FilingListing::new();
        listing.insert(
            "zeta_2019".to_string(),
            descriptor("Zeta Corp", "200", "10-K", "2019", "2019-12-31"),
        );
        listing.insert(
            "zeta_2020".to_string(),
            descriptor("Zeta Corp", "200", "10-K", "2020", "2020-12-31"),
        );
        listing.insert(
            "alpha_q2".to_string(),
            descriptor("alpha inc", "1000", "10-Q", "2020", "2020-06-30"),
        );
        listing.insert(
            "mid_2020".to_string(),
            descriptor("Mid Holdings", "31", "8-K", "2020", "2020-03-15"),
        );
        listing
    }

    fn routes(deck: &CardDeck) -> Vec<&str> {
        deck.cards().iter().map(|c| c.route.as_str()).collect()
    }

    #[test]
    fn test_default_order() {
        let mut deck = CardDeck::new();
        assert_eq!(deck.load(&listing()), 4);
        assert_eq!(
            routes(&deck),
            vec!["mid_2020", "zeta_2020", "zeta_2019", "alpha_q2"]
        );
    }

    #[test]
    fn test_load_replaces_cards_and_skips_invalid() {
        let mut deck = CardDeck::new();
        deck.load(&listing());

        let mut next = FilingListing::new();
        next.insert("only".to_string(), descriptor("Only", "5", "10-K", "2021", "2021-12-31"));
        next.insert("broken".to_string(), descriptor("Broken", "", "10-K", "2021", ""));

        assert_eq!(deck.load(&next), 1);
        assert_eq!(routes(&deck), vec!["only"]);
    }

    #[test]
    fn test_sort_toggles_between_ascending_and_reverse() {
        let mut deck = CardDeck::new();
        deck.load(&listing());

        deck.sort(SortKey::Date);
        assert!(deck.is_armed(SortKey::Date));
        assert_eq!(
            routes(&deck),
            vec!["zeta_2019", "mid_2020", "alpha_q2", "zeta_2020"]
        );

        deck.sort(SortKey::Date);
        assert!(!deck.is_armed(SortKey::Date));
        assert_eq!(
            routes(&deck),
            vec!["zeta_2020", "alpha_q2", "mid_2020", "zeta_2019"]
        );
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut deck = CardDeck::new();
        deck.load(&listing());

        deck.sort(SortKey::Name);
        let names: Vec<&str> = deck.cards().iter().map(|c| c.filer.as_str()).collect();
        assert_eq!(names[0], "alpha inc");
        assert_eq!(names[1], "Mid Holdings");
    }

    #[test]
    fn test_sort_by_cik_is_numeric() {
        let mut deck = CardDeck::new();
        deck.load(&listing());
        deck.sort(SortKey::Date);

        deck.sort(SortKey::Cik);
        let ciks: Vec<&str> = deck.cards().iter().map(|c| c.cik.as_str()).collect();
        assert_eq!(ciks, vec!["31", "200", "200", "1000"]);
    }

    #[test]
    fn test_sort_controls_are_independent() {
        let mut deck = CardDeck::new();
        deck.load(&listing());

        deck.sort(SortKey::Form);
        assert_eq!(deck.cards()[0].form, "10-k");
        deck.sort(SortKey::Name);
        assert!(deck.is_armed(SortKey::Form));
        assert!(deck.is_armed(SortKey::Name));
    }

    #[test]
    fn test_search_single_string() {
        let mut deck = CardDeck::new();
        deck.load(&listing());

        assert_eq!(deck.search("ZETA"), 2);
        assert!(deck.visible_cards().all(|c| c.filer == "Zeta Corp"));

        assert_eq!(deck.search("zeta 2020"), 0);
        assert_eq!(deck.search(""), 4);
    }

    #[test]
    fn test_search_terms_requires_every_term() {
        let mut deck = CardDeck::new();
        deck.load(&listing());

        assert_eq!(deck.search_terms("zeta 2020"), 1);
        assert_eq!(deck.visible_cards().next().unwrap().route, "zeta_2020");

        assert_eq!(deck.search_terms("  10-q   alpha "), 1);
        assert_eq!(deck.search_terms("zeta nothing"), 0);
        assert_eq!(deck.search_terms("   "), 4);
    }

    #[test]
    fn test_card_lookup() {
        let mut deck = CardDeck::new();
        deck.load(&listing());

        assert_eq!(deck.card("alpha_q2").unwrap().filer, "alpha inc");
        assert!(matches!(deck.card("nope"), Err(CardError::NotFound(_))));
    }

    #[test]
    fn test_cards_sharing_a_key_stay_addressable() {
        let mut jan = descriptor("Acme", "1234", "8-K", "", "2021-01-12");
        jan.data_attrs.fiscal_period.clear();
        let mut mar = descriptor("Acme", "1234", "8-K", "", "2021-03-09");
        mar.data_attrs.fiscal_period.clear();

        let mut listing = FilingListing::new();
        listing.insert("acme_8k_jan".to_string(), jan);
        listing.insert("acme_8k_mar".to_string(), mar);

        let mut deck = CardDeck::new();
        assert_eq!(deck.load(&listing), 2);
        assert_eq!(deck.cards()[0].id, deck.cards()[1].id);

        let jan = deck.card("acme_8k_jan").unwrap();
        assert_eq!(jan.prime_doc, "acme-2021-01-12.htm");
        assert_eq!(deck.card("acme_8k_mar").unwrap().prime_doc, "acme-2021-03-09.htm");
    }
}

//! Filing identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite business key of a filing.
///
/// All parts are stored lower-cased so that keys built from differently
/// cased listings compare equal. Every element id used by the tab strip is
/// derived from this key rather than stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilingKey {
    /// Entity central index key
    pub cik: String,
    /// Form type, e.g. `10-k`
    pub form: String,
    /// Fiscal period focus, e.g. `fy` or `q2`
    pub fiscal_period: String,
    /// Fiscal year focus
    pub fiscal_year: String,
}

impl FilingKey {
    pub fn new(
        cik: impl AsRef<str>,
        form: impl AsRef<str>,
        fiscal_period: impl AsRef<str>,
        fiscal_year: impl AsRef<str>,
    ) -> Self {
        let normalize = |s: &str| s.trim().to_lowercase();

        Self {
            cik: normalize(cik.as_ref()),
            form: normalize(form.as_ref()),
            fiscal_period: normalize(fiscal_period.as_ref()),
            fiscal_year: normalize(fiscal_year.as_ref()),
        }
    }

    /// Identity of the card itself, safe to use as an element id
    pub fn card_id(&self) -> String {
        [
            self.cik.as_str(),
            self.form.as_str(),
            self.fiscal_period.as_str(),
            self.fiscal_year.as_str(),
        ]
        .concat()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
    }

    pub fn nav_id(&self) -> String {
        format!("{}-nav", self.card_id())
    }

    pub fn frame_id(&self) -> String {
        format!("{}-frame", self.card_id())
    }

    pub fn selector_id(&self) -> String {
        format!("{}-selector", self.card_id())
    }

    /// True when `id` is the card id or one of the ids derived from it
    pub fn owns_id(&self, id: &str) -> bool {
        let card_id = self.card_id();
        matches!(
            id.strip_prefix(card_id.as_str()),
            Some("" | "-nav" | "-frame" | "-selector")
        )
    }

    /// Fiscal focus rendered for titles, e.g. ` (FY2020)`; empty when unknown
    pub fn fiscal_suffix(&self) -> String {
        if self.fiscal_period.is_empty() && self.fiscal_year.is_empty() {
            String::new()
        } else {
            format!(
                " ({}{})",
                self.fiscal_period.to_uppercase(),
                self.fiscal_year
            )
        }
    }
}

impl fmt::Display for FilingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.card_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_ids() {
        let key = FilingKey::new("0000320193", "10-K", "FY", "2020");
        assert_eq!(key.card_id(), "000032019310kfy2020");
        assert_eq!(key.nav_id(), "000032019310kfy2020-nav");
        assert_eq!(key.frame_id(), "000032019310kfy2020-frame");
        assert_eq!(key.selector_id(), "000032019310kfy2020-selector");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let a = FilingKey::new("123", "10-Q", "Q2", "2021");
        let b = FilingKey::new("123", "10-q", "q2", "2021 ");
        assert_eq!(a, b);
    }

    #[test]
    fn test_owns_id() {
        let key = FilingKey::new("123", "10-Q", "Q2", "2021");
        assert!(key.owns_id("12310qq22021"));
        assert!(key.owns_id("12310qq22021-frame"));
        assert!(!key.owns_id("12310qq22021-other"));
        assert!(!key.owns_id("99910qq22021-nav"));
    }

    #[test]
    fn test_fiscal_suffix() {
        assert_eq!(
            FilingKey::new("1", "10-K", "FY", "2020").fiscal_suffix(),
            " (FY2020)"
        );
        assert_eq!(FilingKey::new("1", "8-K", "", "").fiscal_suffix(), "");
    }
}

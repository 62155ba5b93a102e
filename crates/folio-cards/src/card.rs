//! Filing card

use chrono::NaiveDate;
use serde::Serialize;

use folio_tabs::{CardRef, FilingKey};

use crate::descriptor::{FilingDescriptor, LabeledValue};
use crate::error::CardError;
use crate::Result;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One labelled info row on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardField {
    pub name: &'static str,
    pub label: String,
    pub value: String,
}

impl CardField {
    fn new(name: &'static str, row: &LabeledValue) -> Self {
        let label = if row.label().is_empty() {
            String::new()
        } else {
            format!("{}:", row.label())
        };

        Self {
            name,
            label,
            value: row.value().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    /// Element id, derived from the key
    pub id: String,
    /// Route key of the filing in the listing
    pub route: String,
    pub key: FilingKey,
    /// Registrant name with ticker
    pub filer: String,
    pub cik: String,
    pub form: String,
    pub fiscal_period: String,
    pub fiscal_year: String,
    /// Raw period end as listed (lower-cased)
    pub period_end_text: String,
    pub period_end: Option<NaiveDate>,
    pub filing_date_text: String,
    pub filing_date: Option<NaiveDate>,
    pub inline_xbrl: bool,
    /// Primary document file name, kept with its original casing
    pub prime_doc: String,
    /// Base link of the rendered filing folder
    pub link: String,
    /// Filing index page on EDGAR when the listing carries one
    pub index_link: Option<String>,
    pub fields: Vec<CardField>,
    /// Cleared by search when the card does not match
    pub visible: bool,
}

impl Card {
    pub fn from_descriptor(route: &str, descriptor: &FilingDescriptor) -> Result<Self> {
        let attrs = &descriptor.data_attrs;
        let lower = |s: &str| s.trim().to_lowercase();

        if attrs.cik.trim().is_empty() {
            return Err(CardError::InvalidDescriptor {
                route: route.to_string(),
                reason: "missing entity id".to_string(),
            });
        }

        let key = FilingKey::new(&attrs.cik, &attrs.form, &attrs.fiscal_period, &attrs.fiscal_year);
        let period_end = NaiveDate::parse_from_str(attrs.period_end.trim(), DATE_FORMAT).ok();
        let filing_date = NaiveDate::parse_from_str(attrs.filing_date.trim(), DATE_FORMAT).ok();
        let index_link = Some(descriptor.index_link.value().trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        let fields = vec![
            CardField::new("cik", &descriptor.cik),
            CardField::new("doctype", &descriptor.doc_type),
            CardField::new("docEndDate", &descriptor.doc_end_date),
            CardField::new("fyEnd", &descriptor.fiscal_year_end),
            CardField::new("filingDate", &descriptor.filing_date),
            CardField::new("inlineXbrl", &descriptor.inline_xbrl),
        ];

        Ok(Self {
            id: key.card_id(),
            route: route.to_string(),
            filer: descriptor.header.trim().to_string(),
            cik: key.cik.clone(),
            form: key.form.clone(),
            fiscal_period: key.fiscal_period.clone(),
            fiscal_year: key.fiscal_year.clone(),
            key,
            period_end_text: lower(&attrs.period_end),
            period_end,
            filing_date_text: lower(&attrs.filing_date),
            filing_date,
            inline_xbrl: lower(&attrs.inline_xbrl) == "yes",
            prime_doc: attrs.prime_doc.trim().to_string(),
            link: format!("/filing/{}", route),
            index_link,
            fields,
            visible: true,
        })
    }

    /// The card can only be opened in a tab when its primary document is known
    pub fn is_viewable(&self) -> bool {
        !self.prime_doc.is_empty()
    }

    pub fn tab_source(&self) -> CardRef {
        CardRef {
            key: self.key.clone(),
            filer: self.filer.clone(),
            prime_doc: self.prime_doc.clone(),
            inline_xbrl: self.inline_xbrl,
        }
    }

    /// Lower-cased attribute values free-text search looks at
    pub fn search_fields(&self) -> [String; 10] {
        [
            self.cik.clone(),
            self.form.clone(),
            self.fiscal_period.clone(),
            self.fiscal_year.clone(),
            self.period_end_text.clone(),
            if self.inline_xbrl { "yes" } else { "no" }.to_string(),
            self.filing_date_text.clone(),
            self.prime_doc.to_lowercase(),
            self.filer.to_lowercase(),
            self.route.to_lowercase(),
        ]
    }

    /// True when any search field contains the (already lower-cased) term
    pub fn matches(&self, term: &str) -> bool {
        self.search_fields().iter().any(|f| f.contains(term))
    }

    /// CIK as a number for ordering; non-numeric ids sort last
    pub(crate) fn cik_number(&self) -> u64 {
        self.cik.parse().unwrap_or(u64::MAX)
    }
}

/// Redirect link resolving the filing's EDGAR index page
pub fn edgar_link(card: &Card) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("cik", &card.cik)
        .append_pair("formType", &card.form)
        .append_pair("reportDate", &card.period_end_text)
        .append_pair("filingDate", &card.filing_date_text)
        .append_pair("route", &card.route)
        .finish();

    format!("/EdgarLink?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::descriptor;

    #[test]
    fn test_card_from_descriptor() {
        let card = Card::from_descriptor(
            "acme_2020",
            &descriptor("Acme Corp", "0000001234", "10-K", "2020", "2020-12-31"),
        )
        .unwrap();

        assert_eq!(card.id, "000000123410kfy2020");
        assert_eq!(card.filer, "Acme Corp");
        assert_eq!(card.form, "10-k");
        assert_eq!(card.link, "/filing/acme_2020");
        assert_eq!(card.period_end, NaiveDate::from_ymd_opt(2020, 12, 31));
        assert!(card.inline_xbrl);
        assert!(card.visible);
        assert!(card.index_link.is_none());
        assert_eq!(card.fields[0].label, "Entity Central Index Key:");
        assert_eq!(card.fields[0].value, "0000001234");
    }

    #[test]
    fn test_missing_cik_rejected() {
        let result = Card::from_descriptor("x", &descriptor("Acme", " ", "10-K", "2020", ""));
        assert!(matches!(result, Err(CardError::InvalidDescriptor { .. })));
    }

    #[test]
    fn test_unparseable_dates_are_kept_as_text() {
        let card =
            Card::from_descriptor("x", &descriptor("Acme", "1", "10-K", "2020", "Sep. 26, 2020"))
                .unwrap();
        assert!(card.period_end.is_none());
        assert_eq!(card.period_end_text, "sep. 26, 2020");
    }

    #[test]
    fn test_matches() {
        let card =
            Card::from_descriptor("acme_2020", &descriptor("Acme Corp", "1234", "10-Q", "2020", "2020-06-30"))
                .unwrap();
        assert!(card.matches("acme"));
        assert!(card.matches("10-q"));
        assert!(card.matches("2020-06"));
        assert!(!card.matches("10-k"));
    }

    #[test]
    fn test_tab_source() {
        let card =
            Card::from_descriptor("acme", &descriptor("Acme Corp", "1234", "10-Q", "2020", "2020-06-30"))
                .unwrap();
        let source = card.tab_source();
        assert_eq!(source.key, card.key);
        assert_eq!(source.filer, "Acme Corp");
        assert_eq!(source.prime_doc, "acmecorp-2020-06-30.htm");
    }

    #[test]
    fn test_edgar_link() {
        let card =
            Card::from_descriptor("acme 2020", &descriptor("Acme", "1234", "10-K", "2020", "2020-12-31"))
                .unwrap();
        assert_eq!(
            edgar_link(&card),
            "/EdgarLink?cik=1234&formType=10-k&reportDate=2020-12-31&filingDate=2021-02-15&route=acme+2020"
        );
    }
}

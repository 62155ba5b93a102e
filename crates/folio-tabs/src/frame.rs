//! Viewer frames and document-type selectors

use serde::{Deserialize, Serialize};

use crate::tab::NavTab;

/// Path of the inline viewer; the document path is appended as `doc`
const INLINE_VIEWER: &str = "/home/ix.html?xbrl=true&doc=";
const FILING_SUMMARY: &str = "FilingSummary.htm";

/// The fixed set of renderings a selector offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentVariant {
    PrimaryDocument,
    FilingSummary,
    InlineViewer,
}

impl DocumentVariant {
    /// Selector order; the first entry is the initial frame source
    pub const ALL: [DocumentVariant; 3] = [
        DocumentVariant::PrimaryDocument,
        DocumentVariant::FilingSummary,
        DocumentVariant::InlineViewer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentVariant::PrimaryDocument => "Primary Document",
            DocumentVariant::FilingSummary => "Filing Summary",
            DocumentVariant::InlineViewer => "Inline Viewer",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentVariant::PrimaryDocument => "primary_document",
            DocumentVariant::FilingSummary => "filing_summary",
            DocumentVariant::InlineViewer => "inline_viewer",
        }
    }

    /// Link for this rendering of the filing a tab points at
    pub fn link_for(&self, tab: &NavTab) -> String {
        let primary = format!("{}/{}", tab.link, tab.prime_doc);
        match self {
            DocumentVariant::PrimaryDocument => primary,
            DocumentVariant::FilingSummary => format!("{}/{}", tab.link, FILING_SUMMARY),
            DocumentVariant::InlineViewer if tab.inline_xbrl => {
                format!("{}{}", INLINE_VIEWER, primary)
            }
            DocumentVariant::InlineViewer => primary,
        }
    }
}

impl std::fmt::Display for DocumentVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary_document" => Ok(DocumentVariant::PrimaryDocument),
            "filing_summary" => Ok(DocumentVariant::FilingSummary),
            "inline_viewer" => Ok(DocumentVariant::InlineViewer),
            _ => Err(format!("Unknown document variant: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOption {
    pub variant: DocumentVariant,
    pub label: String,
    pub link: String,
}

/// Document-type chooser shown in the title area next to its frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selector {
    pub id: String,
    pub frame_id: String,
    pub options: Vec<SelectorOption>,
    pub selected: DocumentVariant,
    pub visible: bool,
}

impl Selector {
    pub fn new(tab: &NavTab) -> Self {
        let options = DocumentVariant::ALL
            .iter()
            .map(|variant| SelectorOption {
                variant: *variant,
                label: variant.label().to_string(),
                link: variant.link_for(tab),
            })
            .collect();

        Self {
            id: tab.selector_id.clone(),
            frame_id: tab.frame_id.clone(),
            options,
            selected: DocumentVariant::ALL[0],
            visible: false,
        }
    }

    pub fn option(&self, variant: DocumentVariant) -> Option<&SelectorOption> {
        self.options.iter().find(|o| o.variant == variant)
    }

    pub fn first_link(&self) -> &str {
        self.options.first().map(|o| o.link.as_str()).unwrap_or_default()
    }

    /// Mark a variant as chosen and return its link
    pub fn select(&mut self, variant: DocumentVariant) -> Option<&str> {
        let link = self.options.iter().find(|o| o.variant == variant)?;
        self.selected = variant;
        Some(link.link.as_str())
    }
}

/// Embedded document viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub id: String,
    pub source: String,
    pub visible: bool,
}

impl Frame {
    pub fn new(id: String, source: String) -> Self {
        Self {
            id,
            source,
            visible: false,
        }
    }

    pub fn navigate(&mut self, link: &str) {
        self.source = link.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::FilingKey;
    use crate::tab::CardRef;

    fn tab(inline_xbrl: bool) -> NavTab {
        let card = CardRef {
            key: FilingKey::new("320193", "10-K", "FY", "2020"),
            filer: "Apple Inc.".to_string(),
            prime_doc: "aapl-20200926.htm".to_string(),
            inline_xbrl,
        };
        NavTab::new(&card, "/filing/aapl").unwrap()
    }

    #[test]
    fn test_selector_options() {
        let selector = Selector::new(&tab(true));
        let links: Vec<&str> = selector.options.iter().map(|o| o.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "/filing/aapl/aapl-20200926.htm",
                "/filing/aapl/FilingSummary.htm",
                "/home/ix.html?xbrl=true&doc=/filing/aapl/aapl-20200926.htm",
            ]
        );
        assert_eq!(selector.first_link(), "/filing/aapl/aapl-20200926.htm");
        assert_eq!(selector.frame_id, "32019310kfy2020-frame");
    }

    #[test]
    fn test_inline_option_without_inline_capability() {
        let selector = Selector::new(&tab(false));
        let inline = selector.option(DocumentVariant::InlineViewer).unwrap();
        assert_eq!(inline.link, "/filing/aapl/aapl-20200926.htm");
    }

    #[test]
    fn test_select_variant() {
        let mut selector = Selector::new(&tab(true));
        let link = selector.select(DocumentVariant::FilingSummary).unwrap();
        assert_eq!(link, "/filing/aapl/FilingSummary.htm");
        assert_eq!(selector.selected, DocumentVariant::FilingSummary);
    }
}

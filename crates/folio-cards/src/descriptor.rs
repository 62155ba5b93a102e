//! Wire model of the filings listing
//!
//! The listing is a JSON object keyed by route; each value is the metadata
//! document written next to a rendered filing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route key → descriptor
pub type FilingListing = BTreeMap<String, FilingDescriptor>;

/// `[label, value]` pair as stored in the metadata document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledValue(pub String, pub String);

impl LabeledValue {
    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &str {
        &self.1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingDescriptor {
    /// Registrant name, with ticker when known
    #[serde(rename = "card-header")]
    pub header: String,
    #[serde(rename = "card-cik", default)]
    pub cik: LabeledValue,
    #[serde(rename = "card-doctype", default)]
    pub doc_type: LabeledValue,
    #[serde(rename = "card-docEndDate", default)]
    pub doc_end_date: LabeledValue,
    #[serde(rename = "card-fyEnd", default)]
    pub fiscal_year_end: LabeledValue,
    #[serde(rename = "card-filingDate", default)]
    pub filing_date: LabeledValue,
    #[serde(rename = "card-sourceFileLoc", default)]
    pub source_file: LabeledValue,
    #[serde(rename = "card-inlineXbrl", default)]
    pub inline_xbrl: LabeledValue,
    #[serde(rename = "indexLink", default)]
    pub index_link: LabeledValue,
    #[serde(rename = "primeDoc", default)]
    pub prime_doc: LabeledValue,
    #[serde(rename = "dataAttrs")]
    pub data_attrs: DataAttrs,
    #[serde(rename = "reportFolder", default)]
    pub report_folder: Option<String>,
}

/// Positional search/sort attributes of a filing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct DataAttrs {
    pub cik: String,
    pub form: String,
    pub fiscal_period: String,
    pub fiscal_year: String,
    pub period_end: String,
    pub inline_xbrl: String,
    pub filing_date: String,
    pub prime_doc: String,
}

const DATA_ATTRS_LEN: usize = 8;

impl TryFrom<Vec<String>> for DataAttrs {
    type Error = String;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        let values: [String; DATA_ATTRS_LEN] = values.try_into().map_err(|v: Vec<String>| {
            format!(
                "expected {} data attributes, got {}",
                DATA_ATTRS_LEN,
                v.len()
            )
        })?;
        let [cik, form, fiscal_period, fiscal_year, period_end, inline_xbrl, filing_date, prime_doc] =
            values;

        Ok(Self {
            cik,
            form,
            fiscal_period,
            fiscal_year,
            period_end,
            inline_xbrl,
            filing_date,
            prime_doc,
        })
    }
}

impl From<DataAttrs> for Vec<String> {
    fn from(attrs: DataAttrs) -> Self {
        vec![
            attrs.cik,
            attrs.form,
            attrs.fiscal_period,
            attrs.fiscal_year,
            attrs.period_end,
            attrs.inline_xbrl,
            attrs.filing_date,
            attrs.prime_doc,
        ]
    }
}

//! Descriptor builders shared by the card tests

use crate::descriptor::{DataAttrs, FilingDescriptor, LabeledValue};

fn row(label: &str, value: &str) -> LabeledValue {
    LabeledValue(label.to_string(), value.to_string())
}

pub fn descriptor(filer: &str, cik: &str, form: &str, year: &str, period_end: &str) -> FilingDescriptor {
    let prime_doc = format!("{}-{}.htm", filer.to_lowercase().replace(' ', ""), period_end);

    FilingDescriptor {
        header: filer.to_string(),
        cik: row("Entity Central Index Key", cik),
        doc_type: row("Document Type", form),
        doc_end_date: row("Report Date", period_end),
        fiscal_year_end: row("Current Fiscal Year End Date", "--12-31"),
        filing_date: row("Filing Date", "2021-02-15"),
        source_file: row("Source File", &format!("/reports/{}", prime_doc)),
        inline_xbrl: row("Inline XBRL", "Yes"),
        index_link: row("Filing Link", ""),
        prime_doc: row("Primary Document", &prime_doc),
        data_attrs: DataAttrs {
            cik: cik.to_string(),
            form: form.to_string(),
            fiscal_period: "FY".to_string(),
            fiscal_year: year.to_string(),
            period_end: period_end.to_string(),
            inline_xbrl: "Yes".to_string(),
            filing_date: "2021-02-15".to_string(),
            prime_doc,
        },
        report_folder: None,
    }
}

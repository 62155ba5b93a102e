//! Palette and text colour tables

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One named set of CSS custom properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub id: String,
    pub name: String,
    /// `(property, value)` pairs in document order
    pub properties: Vec<(String, String)>,
}

impl Palette {
    /// Colour shown next to the palette name in the menu
    pub fn swatch(&self) -> &str {
        self.properties
            .first()
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }
}

/// Palettes keyed by id, in the order the table document lists them
///
/// The document shape is `{"<id>": ["<name>", [["--prop", "value"], ...]], ...}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct PaletteTable {
    palettes: Vec<Palette>,
}

impl TryFrom<Map<String, Value>> for PaletteTable {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let palettes = map
            .into_iter()
            .map(|(id, value)| {
                let (name, properties): (String, Vec<(String, String)>) =
                    serde_json::from_value(value)
                        .map_err(|e| format!("palette {}: {}", id, e))?;
                Ok(Palette {
                    id,
                    name,
                    properties,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self { palettes })
    }
}

impl PaletteTable {
    pub fn new(palettes: Vec<Palette>) -> Self {
        Self { palettes }
    }

    pub fn get(&self, id: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.id == id)
    }

    pub fn nth(&self, index: usize) -> Option<&Palette> {
        self.palettes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

/// Text colour choices keyed by the value of the colour control
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextColors(HashMap<String, String>);

impl TextColors {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for TextColors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::PALETTES;

    #[test]
    fn test_table_keeps_document_order() {
        let table: PaletteTable = serde_json::from_str(PALETTES).unwrap();
        let ids: Vec<&str> = table.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["ocean", "desert", "forest", "slate", "ember", "dusk", "snow"]
        );
    }

    #[test]
    fn test_palette_fields() {
        let table: PaletteTable = serde_json::from_str(PALETTES).unwrap();
        let ocean = table.get("ocean").unwrap();
        assert_eq!(ocean.name, "Ocean");
        assert_eq!(ocean.swatch(), "#003f5c");
        assert_eq!(
            ocean.properties[1],
            ("--accent-color".to_string(), "#58508d".to_string())
        );
        assert!(table.get("nope").is_none());
    }

    #[test]
    fn test_malformed_palette_rejected() {
        let err = serde_json::from_str::<PaletteTable>(r##"{"bad": ["Bad", "#fff"]}"##).unwrap_err();
        assert!(err.to_string().contains("palette bad"));
    }

    #[test]
    fn test_text_colors() {
        let colors: TextColors =
            serde_json::from_str(r##"{"white": "#ffffff", "charcoal": "#36454f"}"##).unwrap();
        assert_eq!(colors.get("charcoal"), Some("#36454f"));
        assert_eq!(colors.len(), 2);
        assert!(colors.get("red").is_none());
    }
}

use crate::palette::{PaletteTable, TextColors};

pub(crate) const PALETTES: &str = r##"{
    "ocean": ["Ocean", [["--main-color", "#003f5c"], ["--accent-color", "#58508d"]]],
    "desert": ["Desert", [["--main-color", "#c2b280"], ["--accent-color", "#8b4513"]]],
    "forest": ["Forest", [["--main-color", "#228b22"]]],
    "slate": ["Slate", [["--main-color", "#708090"]]],
    "ember": ["Ember", [["--main-color", "#b22222"]]],
    "dusk": ["Dusk", [["--main-color", "#4b0082"]]],
    "snow": ["Snow", [["--main-color", "#fffafa"]]]
}"##;

pub(crate) const TEXT_COLORS: &str = r##"{"white": "#ffffff", "charcoal": "#36454f"}"##;

pub(crate) fn palettes() -> PaletteTable {
    serde_json::from_str(PALETTES).unwrap()
}

pub(crate) fn text_colors() -> TextColors {
    serde_json::from_str(TEXT_COLORS).unwrap()
}

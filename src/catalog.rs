use serde::Deserialize;

use crate::error::PaletteError;
use crate::swatch::{normalize_hex, ColorSwatch, Effect};

/// Supplies swatches by hex or name lookup
pub trait ColorCatalog {
    fn all(&self) -> &[ColorSwatch];

    fn find_by_hex(&self, hex: &str) -> Option<ColorSwatch> {
        let wanted = normalize_hex(hex).ok()?;
        self.all()
            .iter()
            .find(|swatch| swatch.hex_code().eq_ignore_ascii_case(&wanted))
            .cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<ColorSwatch> {
        self.all()
            .iter()
            .find(|swatch| swatch.color_name().eq_ignore_ascii_case(name.trim()))
            .cloned()
    }
}

const BUILTIN_SHADES: &[(&str, &str, Effect)] = &[
    ("Bare", "#E8C8B0", Effect::Matte),
    ("Champagne", "#F7E7CE", Effect::Shimmer),
    ("Rose Gold", "#B76E79", Effect::Shimmer),
    ("Peach Fuzz", "#FFBE98", Effect::Matte),
    ("Terracotta", "#C46A4B", Effect::Matte),
    ("Copper", "#B87333", Effect::Sparkly),
    ("Bronze", "#8C6239", Effect::Shimmer),
    ("Espresso", "#3B2417", Effect::Matte),
    ("Plum", "#8E4585", Effect::Shimmer),
    ("Mauve", "#B784A7", Effect::Matte),
    ("Ruby", "#9B111E", Effect::Sparkly),
    ("Olive", "#6B6B2A", Effect::Matte),
    ("Emerald", "#1F7A4D", Effect::Sparkly),
    ("Teal", "#1B6F76", Effect::Shimmer),
    ("Navy", "#1F2A5A", Effect::Matte),
    ("Midnight", "#121212", Effect::Sparkly),
];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    color_name: String,
    hex_code: String,
    #[serde(default)]
    effect: Effect,
}

/// The fixed catalog shipped with the application
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    swatches: Vec<ColorSwatch>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        let swatches = BUILTIN_SHADES
            .iter()
            .filter_map(|(name, hex, effect)| ColorSwatch::new(*name, hex, *effect).ok())
            .collect();
        Self { swatches }
    }
}

impl BuiltinCatalog {
    /// Load a catalog from a JSON array of `{colorName, hexCode, effect}`
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        let swatches = entries
            .into_iter()
            .map(|entry| ColorSwatch::new(entry.color_name, &entry.hex_code, entry.effect))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { swatches })
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

impl ColorCatalog for BuiltinCatalog {
    fn all(&self) -> &[ColorSwatch] {
        &self.swatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = BuiltinCatalog::default();
        assert_eq!(catalog.len(), BUILTIN_SHADES.len());

        let ruby = catalog.find_by_hex("#9b111e").unwrap();
        assert_eq!(ruby.color_name(), "Ruby");
        assert_eq!(catalog.find_by_name("  plum ").unwrap().hex_code(), "#8E4585");
        assert!(catalog.find_by_hex("#000001").is_none());
        assert!(catalog.find_by_hex("not a color").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r##"[{"colorName":"Red","hexCode":"#f00"},{"colorName":"Gold","hexCode":"#FFD700","effect":"sparkly"}]"##;
        let catalog = BuiltinCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_hex("#FF0000").unwrap().color_name(), "Red");
        assert_eq!(catalog.find_by_name("gold").unwrap().effect(), Effect::Sparkly);

        assert!(BuiltinCatalog::from_json(r##"[{"colorName":"Bad","hexCode":"#12"}]"##).is_err());
    }
}

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Visual finish of an eyeshadow swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    Matte,
    Shimmer,
    Sparkly,
}

impl Effect {
    pub fn label(&self) -> &'static str {
        match self {
            Effect::Matte => "Matte",
            Effect::Shimmer => "Shimmer",
            Effect::Sparkly => "Sparkly",
        }
    }
}

/// A single selectable color tile.
///
/// Swatches are immutable values: they are copied into grid cells and drag
/// payloads, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSwatch {
    color_name: String,
    hex_code: String,
    bg_color: String,
    is_dark: bool,
    #[serde(default)]
    effect: Effect,
}

impl ColorSwatch {
    /// Create a swatch from a name and hex code.
    ///
    /// The background color defaults to the hex code and darkness is derived
    /// from its luminance.
    pub fn new(color_name: impl Into<String>, hex_code: &str, effect: Effect) -> Result<Self, PaletteError> {
        let color = parse_hex(hex_code)?;
        let hex_code = normalize_hex(hex_code)?;
        Ok(Self {
            color_name: color_name.into(),
            bg_color: hex_code.clone(),
            hex_code,
            is_dark: is_dark_color(color),
            effect,
        })
    }

    /// Decode a swatch from serialized drag transfer data
    pub fn from_transfer(data: &str) -> Result<Self, PaletteError> {
        let decoded: ColorSwatch = serde_json::from_str(data)?;
        // Canonical hex and darkness come from the color, not the payload
        let mut swatch = Self::new(decoded.color_name, &decoded.hex_code, decoded.effect)?;
        swatch.bg_color = decoded.bg_color;
        Ok(swatch)
    }

    /// Encode this swatch as drag transfer data
    pub fn to_transfer(&self) -> String {
        // Serializing a plain struct of strings and bools cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn color_name(&self) -> &str {
        &self.color_name
    }

    pub fn hex_code(&self) -> &str {
        &self.hex_code
    }

    pub fn bg_color(&self) -> &str {
        &self.bg_color
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// The swatch color, falling back to magenta for unparsable hex codes
    pub fn color(&self) -> Color32 {
        parse_hex(&self.hex_code).unwrap_or(Color32::from_rgb(255, 0, 255))
    }

    /// Text color that stays readable on top of this swatch
    pub fn label_color(&self) -> Color32 {
        if self.is_dark {
            Color32::WHITE
        } else {
            Color32::BLACK
        }
    }
}

/// Parse `#RGB`, `#RRGGBB` or the same without the leading `#`
pub fn parse_hex(hex: &str) -> Result<Color32, PaletteError> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || PaletteError::InvalidHex(hex.to_string());

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid()),
    };
    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
    Ok(Color32::from_rgb(
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

/// Canonical `#RRGGBB` uppercase form
pub fn normalize_hex(hex: &str) -> Result<String, PaletteError> {
    let color = parse_hex(hex)?;
    Ok(to_hex(color))
}

pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// Relative luminance below the midpoint counts as dark
pub fn is_dark_color(color: Color32) -> bool {
    let luminance =
        0.299 * color.r() as f32 + 0.587 * color.g() as f32 + 0.114 * color.b() as f32;
    luminance < 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#FF0000").unwrap(), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_hex("00ff00").unwrap(), Color32::from_rgb(0, 255, 0));
        assert_eq!(parse_hex("#00f").unwrap(), Color32::from_rgb(0, 0, 255));
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
        assert!(parse_hex("#+FFFFF").is_err());
        assert!(parse_hex("-FFFFF").is_err());
    }

    #[test]
    fn test_new_swatch_derives_darkness() {
        let dark = ColorSwatch::new("Espresso", "#3b2417", Effect::Matte).unwrap();
        assert!(dark.is_dark());
        assert_eq!(dark.hex_code(), "#3B2417");
        assert_eq!(dark.label_color(), Color32::WHITE);

        let light = ColorSwatch::new("Champagne", "#F7E7CE", Effect::Shimmer).unwrap();
        assert!(!light.is_dark());
        assert_eq!(light.effect().label(), "Shimmer");
    }

    #[test]
    fn test_transfer_decoding() {
        let swatch = ColorSwatch::new("Ruby", "#9B111E", Effect::Sparkly).unwrap();
        let decoded = ColorSwatch::from_transfer(&swatch.to_transfer()).unwrap();
        assert_eq!(decoded, swatch);

        let wire = r##"{"colorName":"Plum","hexCode":"#8E4585","bgColor":"#8E4585","isDark":true,"effect":"shimmer"}"##;
        let plum = ColorSwatch::from_transfer(wire).unwrap();
        assert_eq!(plum.effect(), Effect::Shimmer);
        assert_eq!(plum.color_name(), "Plum");
    }

    #[test]
    fn test_transfer_payload_is_canonicalized() {
        let red = ColorSwatch::new("Red", "#FF0000", Effect::Matte).unwrap();
        let wire = r##"{"colorName":"Red","hexCode":"#ff0000","bgColor":"#FF0000","isDark":false,"effect":"matte"}"##;
        let decoded = ColorSwatch::from_transfer(wire).unwrap();
        assert_eq!(decoded.hex_code(), "#FF0000");
        assert!(decoded.is_dark());
        assert_eq!(decoded, red);

        let tinted = r##"{"colorName":"Red","hexCode":"f00","bgColor":"#FFEEEE","isDark":false}"##;
        assert_eq!(ColorSwatch::from_transfer(tinted).unwrap().bg_color(), "#FFEEEE");
    }

    #[test]
    fn test_malformed_transfer_is_rejected() {
        assert!(matches!(
            ColorSwatch::from_transfer("not json"),
            Err(PaletteError::MalformedTransfer(_))
        ));
        let bad_hex = r#"{"colorName":"X","hexCode":"zzz","bgColor":"","isDark":false}"#;
        assert!(matches!(
            ColorSwatch::from_transfer(bad_hex),
            Err(PaletteError::InvalidHex(_))
        ));
    }
}

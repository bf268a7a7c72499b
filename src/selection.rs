use egui::Color32;

use crate::swatch::ColorSwatch;

/// The currently selected color.
///
/// Owned by the studio context and passed explicitly to whatever needs to
/// read it. `select` and `clear` are the only writers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    selected: Option<ColorSwatch>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a swatch, returning the previous selection
    pub fn select(&mut self, swatch: ColorSwatch) -> Option<ColorSwatch> {
        self.selected.replace(swatch)
    }

    pub fn clear(&mut self) -> Option<ColorSwatch> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<&ColorSwatch> {
        self.selected.as_ref()
    }

    pub fn selected_color(&self) -> Option<Color32> {
        self.selected.as_ref().map(ColorSwatch::color)
    }

    pub fn is_selected(&self, swatch: &ColorSwatch) -> bool {
        self.selected.as_ref().is_some_and(|s| s.hex_code() == swatch.hex_code())
    }
}

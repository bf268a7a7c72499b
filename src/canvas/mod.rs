use egui::{Pos2, Rect, Vec2};

mod artwork;
mod engine;
mod history;
mod surface;

pub use artwork::{ArtworkLayer, ArtworkSource, EyeArtwork, RasterArtwork};
pub use engine::{BrushSettings, PaintEngine};
pub use history::{SnapshotHistory, DEFAULT_HISTORY_CAPACITY};
pub use surface::{composite_over, Composite, Paint, PaintLayer, RasterSurface, Snapshot};

/// Transparent top layer that owns pointer capture for the painting.
///
/// It is never drawn to. It only maps screen positions into canvas pixels,
/// so painting never reads back from the visible composite.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionLayer {
    canvas_size: Vec2,
    screen_rect: Option<Rect>,
}

impl InteractionLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas_size: Vec2::new(width as f32, height as f32),
            screen_rect: None,
        }
    }

    /// Where the canvas was laid out this frame
    pub fn set_screen_rect(&mut self, rect: Rect) {
        self.screen_rect = Some(rect);
    }

    pub fn screen_rect(&self) -> Option<Rect> {
        self.screen_rect
    }

    pub fn contains(&self, screen_pos: Pos2) -> bool {
        self.screen_rect.is_some_and(|rect| rect.contains(screen_pos))
    }

    /// Map a screen position into canvas pixel coordinates.
    ///
    /// Positions outside the layer are clamped to its edge so a stroke that
    /// leaves the canvas still ends at the border.
    pub fn to_canvas(&self, screen_pos: Pos2) -> Option<Pos2> {
        let rect = self.screen_rect?;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        let relative = (screen_pos - rect.min) / rect.size();
        let scaled = relative.clamp(Vec2::ZERO, Vec2::splat(1.0)) * self.canvas_size;
        Some(scaled.to_pos2())
    }
}

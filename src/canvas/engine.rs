use egui::{Color32, Pos2};
use image::RgbaImage;

use super::artwork::{ArtworkLayer, ArtworkSource, EyeArtwork, RasterArtwork};
use super::history::SnapshotHistory;
use super::surface::{composite_over, Paint, PaintLayer, RasterSurface, Snapshot};
use super::InteractionLayer;
use crate::config::CanvasConfig;
use crate::error::PaintError;
use crate::selection::SelectionStore;

/// Brush parameters applied to subsequent strokes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    /// Line width; dots use half of it as their radius
    pub size: f32,
    pub opacity: f32,
    pub eraser: bool,
}

impl BrushSettings {
    fn paint(&self, color: Color32) -> Paint {
        if self.eraser {
            Paint::eraser(self.opacity)
        } else {
            Paint::color(color, self.opacity)
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    last_position: Pos2,
    paint: Paint,
    size: f32,
}

/// Paints brush and eraser strokes onto a dedicated layer above a static
/// artwork layer, with snapshot-based undo/redo at stroke granularity.
#[derive(Debug)]
pub struct PaintEngine {
    paint: PaintLayer,
    artwork: ArtworkLayer,
    interaction: InteractionLayer,
    brush: BrushSettings,
    size_range: (f32, f32),
    history: SnapshotHistory,
    stroke: Option<ActiveStroke>,
    has_painted: bool,
}

impl PaintEngine {
    /// Build an engine from config, using raster artwork if one is configured
    pub fn from_config(config: &CanvasConfig) -> Self {
        let source: Box<dyn ArtworkSource> = match &config.artwork_path {
            Some(path) => Box::new(RasterArtwork::new(path)),
            None => Box::new(EyeArtwork),
        };
        Self::new(config, source)
    }

    pub fn new(config: &CanvasConfig, source: Box<dyn ArtworkSource>) -> Self {
        let (width, height) = (config.width.max(1), config.height.max(1));
        let paint = PaintLayer::new(width, height);
        let history = SnapshotHistory::new(paint.snapshot(), config.history_capacity);
        let min = config.min_brush_size.max(1.0);
        let max = config.max_brush_size.max(min);

        Self {
            artwork: ArtworkLayer::new(source, width, height, config.iris_color()),
            interaction: InteractionLayer::new(width, height),
            brush: BrushSettings {
                size: config.brush_size.clamp(min, max),
                opacity: config.brush_opacity.clamp(0.0, 1.0),
                eraser: false,
            },
            size_range: (min, max),
            paint,
            history,
            stroke: None,
            has_painted: false,
        }
    }

    /// Start a stroke: stamp one dot at `pos` with the selected color
    pub fn begin_stroke(&mut self, pos: Pos2, selection: &SelectionStore) -> Result<(), PaintError> {
        let color = selection.selected_color().ok_or(PaintError::NoColorSelected)?;
        if self.stroke.is_some() {
            log::debug!("begin_stroke while a stroke is active, committing it first");
            self.end_stroke();
        }

        let paint = self.brush.paint(color);
        let size = self.brush.size;
        self.paint.fill_circle(pos, size / 2.0, &paint);
        self.stroke = Some(ActiveStroke {
            last_position: pos,
            paint,
            size,
        });
        self.has_painted = true;
        Ok(())
    }

    /// Extend the active stroke to `pos`. Without an active stroke this is a no-op.
    pub fn continue_stroke(&mut self, pos: Pos2, selection: &SelectionStore) -> Result<(), PaintError> {
        let Some(stroke) = self.stroke.as_mut() else {
            return Ok(());
        };
        if selection.selected().is_none() {
            return Err(PaintError::NoColorSelected);
        }
        self.paint.stroke_line(stroke.last_position, pos, stroke.size, &stroke.paint);
        stroke.last_position = pos;
        Ok(())
    }

    /// Finish the active stroke and checkpoint the paint layer.
    ///
    /// Returns `false` if there was no stroke to finish.
    pub fn end_stroke(&mut self) -> bool {
        if self.stroke.take().is_none() {
            return false;
        }
        self.history.push(self.paint.snapshot());
        true
    }

    pub fn is_stroke_active(&self) -> bool {
        self.stroke.is_some()
    }

    /// Wipe all pigment. The artwork layer is untouched.
    ///
    /// Recorded as a checkpoint when there was something to wipe.
    pub fn clear_all(&mut self) {
        self.stroke = None;
        let had_pixels = self.paint.has_any_pixels();
        self.paint.clear();
        self.has_painted = false;
        if had_pixels {
            self.history.push(self.paint.snapshot());
        }
    }

    /// Step back one stroke. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        // An unfinished stroke becomes its own checkpoint first
        self.end_stroke();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        Self::apply_snapshot(&mut self.paint, &mut self.has_painted, snapshot);
        true
    }

    /// Re-apply the last undone stroke. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        // An unfinished stroke becomes its own checkpoint first
        self.end_stroke();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        Self::apply_snapshot(&mut self.paint, &mut self.has_painted, snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn set_brush_size(&mut self, px: f32) {
        let (min, max) = self.size_range;
        self.brush.size = px.clamp(min, max);
    }

    pub fn set_brush_opacity(&mut self, opacity: f32) {
        self.brush.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_eraser_mode(&mut self, eraser: bool) {
        self.brush.eraser = eraser;
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn brush_size_range(&self) -> (f32, f32) {
        self.size_range
    }

    /// Re-render the artwork with a new iris color. Paint is untouched.
    pub fn set_iris_color(&mut self, color: Color32) {
        self.artwork.set_iris_color(color);
    }

    pub fn iris_color(&self) -> Color32 {
        self.artwork.iris_color()
    }

    pub fn has_any_colors(&self) -> bool {
        self.has_painted
    }

    pub fn size(&self) -> [u32; 2] {
        self.paint.size()
    }

    pub fn paint_layer(&self) -> &PaintLayer {
        &self.paint
    }

    pub fn artwork_layer(&self) -> &ArtworkLayer {
        &self.artwork
    }

    pub fn interaction_layer(&self) -> &InteractionLayer {
        &self.interaction
    }

    pub fn interaction_layer_mut(&mut self) -> &mut InteractionLayer {
        &mut self.interaction
    }

    /// Paint composited over the artwork, as the user sees it
    pub fn composite(&self) -> RgbaImage {
        composite_over(self.artwork.image(), self.paint.image())
    }

    fn apply_snapshot(paint: &mut PaintLayer, has_painted: &mut bool, snapshot: &Snapshot) {
        paint.restore(snapshot);
        *has_painted = snapshot.has_any_pixels();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swatch::{ColorSwatch, Effect};

    fn small_config() -> CanvasConfig {
        CanvasConfig {
            width: 40,
            height: 30,
            brush_size: 6.0,
            brush_opacity: 1.0,
            ..CanvasConfig::default()
        }
    }

    fn red_selection() -> SelectionStore {
        let mut selection = SelectionStore::new();
        selection.select(ColorSwatch::new("Red", "#FF0000", Effect::Matte).unwrap());
        selection
    }

    #[test]
    fn test_begin_requires_color() {
        let mut engine = PaintEngine::from_config(&small_config());
        assert_eq!(
            engine.begin_stroke(Pos2::new(5.0, 5.0), &SelectionStore::new()),
            Err(PaintError::NoColorSelected)
        );
        assert!(!engine.is_stroke_active());
        assert!(!engine.has_any_colors());
    }

    #[test]
    fn test_continue_without_stroke_is_noop() {
        let mut engine = PaintEngine::from_config(&small_config());
        engine.continue_stroke(Pos2::new(10.0, 10.0), &red_selection()).unwrap();
        assert!(!engine.paint_layer().has_any_pixels());
        assert!(!engine.end_stroke());
        assert_eq!(engine.history().undo_len(), 1);
    }

    #[test]
    fn test_dot_and_segment_share_size() {
        let mut engine = PaintEngine::from_config(&small_config());
        let selection = red_selection();
        engine.begin_stroke(Pos2::new(10.0, 15.0), &selection).unwrap();
        engine.continue_stroke(Pos2::new(30.0, 15.0), &selection).unwrap();
        engine.end_stroke();

        let layer = engine.paint_layer();
        // Radius 3 around the dot, half-width 3 along the segment
        assert_eq!(layer.pixel(10, 16).unwrap()[3], 255);
        assert_eq!(layer.pixel(20, 16).unwrap()[3], 255);
        assert_eq!(layer.pixel(20, 19).unwrap()[3], 0);
        assert_eq!(layer.pixel(10, 19).unwrap()[3], 0);
    }

    #[test]
    fn test_brush_setters_clamp() {
        let mut engine = PaintEngine::from_config(&small_config());
        engine.set_brush_size(1000.0);
        assert_eq!(engine.brush().size, 80.0);
        engine.set_brush_opacity(-1.0);
        assert_eq!(engine.brush().opacity, 0.0);
        engine.set_eraser_mode(true);
        assert!(engine.brush().eraser);
    }

    #[test]
    fn test_clear_all_on_empty_layer_adds_no_checkpoint() {
        let mut engine = PaintEngine::from_config(&small_config());
        engine.clear_all();
        assert_eq!(engine.history().undo_len(), 1);
        assert!(!engine.can_undo());
    }
}

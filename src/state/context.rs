//! The studio context owns every piece of shared state and is the one place
//! that turns gestures and paint input into state changes.
//!
//! Components receive it explicitly instead of reaching for globals. The
//! selected color is only ever written by `select_color`, and every change
//! is announced on the event bus.
//!
//! # Example
//!
//! ```rust,no_run
//! use swatch_studio::config::StudioConfig;
//! use swatch_studio::input::PointerSample;
//! use swatch_studio::state::StudioContext;
//!
//! let mut studio = StudioContext::new(StudioConfig::default());
//! let cells = |_: egui::Pos2| Some(4usize);
//! studio.press_carousel(PointerSample::new(10.0, 10.0, 0), 0);
//! studio.gesture_move(PointerSample::new(10.0, 60.0, 16), &cells);
//! studio.gesture_up(PointerSample::new(10.0, 60.0, 32), &cells);
//! assert!(studio.grid().get(4).is_some());
//! ```

use std::path::PathBuf;

use egui::{Color32, Pos2};
use uuid::Uuid;

use super::{CarouselState, Palette, PaletteStore};
use crate::catalog::{BuiltinCatalog, ColorCatalog};
use crate::canvas::PaintEngine;
use crate::config::StudioConfig;
use crate::error::{ExportError, PaintError, PersistenceResult};
use crate::event::{EventBus, GridEvent, PageDirection, StudioEvent};
use crate::export;
use crate::grid::{DropOutcome, GridCellStore, GridSize};
use crate::input::{
    DragOverChange, DragSource, DropAction, GestureAction, GestureClassifier, HitTester, MoveResponse,
    PointerSample,
};
use crate::selection::SelectionStore;
use crate::swatch::ColorSwatch;

/// Swatches shown per carousel page
pub const CAROUSEL_PAGE_SIZE: usize = 6;

#[derive(Debug)]
pub struct StudioContext {
    config: StudioConfig,
    catalog: BuiltinCatalog,
    selection: SelectionStore,
    grid: GridCellStore,
    carousel: CarouselState,
    classifier: GestureClassifier,
    engine: PaintEngine,
    palettes: PaletteStore,
    /// The saved palette the grid was loaded from, if any
    active_palette: Option<Uuid>,
    /// The event bus for broadcasting studio events
    pub event_bus: EventBus,
}

impl StudioContext {
    pub fn new(config: StudioConfig) -> Self {
        Self::with_catalog(config, BuiltinCatalog::default())
    }

    pub fn with_catalog(config: StudioConfig, catalog: BuiltinCatalog) -> Self {
        Self {
            selection: SelectionStore::new(),
            grid: GridCellStore::new(config.default_grid_size),
            carousel: CarouselState::new(catalog.len(), CAROUSEL_PAGE_SIZE),
            classifier: GestureClassifier::new(config.gesture.clone()),
            engine: PaintEngine::from_config(&config.canvas),
            palettes: PaletteStore::new(config.data_dir.join("palettes")),
            active_palette: None,
            event_bus: EventBus::new(),
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BuiltinCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn grid(&self) -> &GridCellStore {
        &self.grid
    }

    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn engine(&self) -> &PaintEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PaintEngine {
        &mut self.engine
    }

    pub fn palettes(&self) -> &PaletteStore {
        &self.palettes
    }

    pub fn active_palette(&self) -> Option<Uuid> {
        self.active_palette
    }

    /// Swatches on the current carousel page, with their catalog indices
    pub fn visible_swatches(&self) -> impl Iterator<Item = (usize, &ColorSwatch)> {
        let range = self.carousel.visible_range();
        self.catalog.all()[range.clone()].iter().enumerate().map(move |(i, s)| (range.start + i, s))
    }

    // --- selection -----------------------------------------------------------

    /// The only writer of the selected color
    pub fn select_color(&mut self, swatch: ColorSwatch) {
        if self.selection.is_selected(&swatch) {
            return;
        }
        log::debug!("Selected {} ({})", swatch.color_name(), swatch.hex_code());
        self.selection.select(swatch.clone());
        self.event_bus.emit(StudioEvent::ColorSelected { swatch });
    }

    /// Select a catalog color by hex code. Returns `false` for unknown colors.
    pub fn select_hex(&mut self, hex: &str) -> bool {
        match self.catalog.find_by_hex(hex) {
            Some(swatch) => {
                self.select_color(swatch);
                true
            }
            None => false,
        }
    }

    // --- gestures ------------------------------------------------------------

    /// Pointer went down on a carousel swatch
    pub fn press_carousel(&mut self, sample: PointerSample, catalog_index: usize) {
        let Some(swatch) = self.catalog.all().get(catalog_index).cloned() else {
            log::debug!("Press on unknown carousel item {}", catalog_index);
            return;
        };
        self.classifier.pointer_down(sample, swatch, DragSource::Carousel);
    }

    /// Pointer went down on a grid cell. Empty cells have nothing to pick up.
    pub fn press_cell(&mut self, sample: PointerSample, cell: usize) {
        let Some(swatch) = self.grid.get(cell).cloned() else {
            self.classifier.cancel();
            return;
        };
        self.classifier.pointer_down(sample, swatch, DragSource::GridCell(cell));
    }

    pub fn gesture_move(&mut self, sample: PointerSample, hit: &dyn HitTester) -> MoveResponse {
        let response = self.classifier.pointer_move(sample, hit);
        if !response.drag_over.is_empty() {
            self.event_bus.emit(StudioEvent::DragOverChanged(response.drag_over));
        }
        response
    }

    /// Finish the gesture and apply whatever it resolved to
    pub fn gesture_up(&mut self, sample: PointerSample, hit: &dyn HitTester) -> Option<GestureAction> {
        let hovered = self.classifier.hovered_cell();
        let action = self.classifier.pointer_up(sample, hit);
        if let Some(cell) = hovered {
            self.event_bus.emit(StudioEvent::DragOverChanged(DragOverChange {
                left: Some(cell),
                entered: None,
            }));
        }
        if let Some(action) = &action {
            self.apply_gesture(action);
        }
        action
    }

    pub fn cancel_gesture(&mut self) {
        self.classifier.cancel();
    }

    /// Desktop drag start from a carousel swatch
    pub fn drag_carousel(&mut self, sample: PointerSample, catalog_index: usize) {
        if let Some(swatch) = self.catalog.all().get(catalog_index).cloned() {
            self.classifier.drag_start(sample, swatch, DragSource::Carousel);
        }
    }

    /// Desktop drop of serialized transfer data
    pub fn drop_transfer(
        &mut self,
        data: &str,
        source: DragSource,
        sample: PointerSample,
        hit: &dyn HitTester,
    ) -> DropOutcome {
        match self.classifier.drop_transfer(data, source, sample, hit) {
            Some(action) => self.apply_drop(action),
            None => DropOutcome::Rejected,
        }
    }

    /// Apply a classified gesture to the studio state
    pub fn apply_gesture(&mut self, action: &GestureAction) -> Option<DropOutcome> {
        match action {
            GestureAction::Tap { payload } => {
                self.select_color(payload.clone());
                None
            }
            GestureAction::SwipeLeft => {
                self.page_carousel(PageDirection::Next);
                None
            }
            GestureAction::SwipeRight => {
                self.page_carousel(PageDirection::Previous);
                None
            }
            GestureAction::Drop(drop) => Some(self.apply_drop(drop.clone())),
        }
    }

    pub fn page_carousel(&mut self, direction: PageDirection) {
        if self.carousel.step(direction) {
            self.event_bus.emit(StudioEvent::CarouselPaged {
                direction,
                page: self.carousel.page(),
            });
        }
    }

    fn apply_drop(&mut self, action: DropAction) -> DropOutcome {
        let outcome = self.grid.apply_drop(&action);
        self.event_bus.emit(StudioEvent::SwatchDropped {
            action,
            applied: outcome.is_applied(),
        });
        outcome
    }

    // --- grid ----------------------------------------------------------------

    pub fn set_grid_size(&mut self, size: GridSize) {
        if size == self.grid.size() {
            return;
        }
        self.grid.resize(size);
        self.event_bus.emit(StudioEvent::GridChanged(GridEvent::Resized { size }));
    }

    pub fn clear_cell(&mut self, index: usize) {
        match self.grid.clear(index) {
            Ok(Some(_)) => self
                .event_bus
                .emit(StudioEvent::GridChanged(GridEvent::CellCleared { index })),
            Ok(None) => {}
            Err(err) => log::warn!("Cannot clear cell: {err}"),
        }
    }

    /// Start a fresh, unsaved palette
    pub fn new_palette(&mut self) {
        self.grid.clear_all();
        self.active_palette = None;
        self.event_bus.emit(StudioEvent::GridChanged(GridEvent::Reset));
    }

    // --- painting ------------------------------------------------------------

    pub fn begin_stroke(&mut self, pos: Pos2) -> Result<(), PaintError> {
        self.engine.begin_stroke(pos, &self.selection)
    }

    pub fn continue_stroke(&mut self, pos: Pos2) -> Result<(), PaintError> {
        self.engine.continue_stroke(pos, &self.selection)
    }

    pub fn end_stroke(&mut self) {
        let eraser = self.engine.brush().eraser;
        if self.engine.end_stroke() {
            self.event_bus.emit(StudioEvent::StrokeCompleted { eraser });
            self.emit_history();
        }
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.engine.undo();
        if changed {
            self.emit_history();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.engine.redo();
        if changed {
            self.emit_history();
        }
        changed
    }

    pub fn clear_canvas(&mut self) {
        self.engine.clear_all();
        self.event_bus.emit(StudioEvent::CanvasCleared);
        self.emit_history();
    }

    pub fn set_iris_color(&mut self, color: Color32) {
        self.engine.set_iris_color(color);
    }

    fn emit_history(&self) {
        self.event_bus.emit(StudioEvent::HistoryChanged {
            can_undo: self.engine.can_undo(),
            can_redo: self.engine.can_redo(),
        });
    }

    // --- palettes ------------------------------------------------------------

    /// Save the grid under `name`, updating the active palette if there is one
    pub fn save_palette(&mut self, name: &str) -> PersistenceResult<Palette> {
        let mut palette = Palette::new(name, self.grid.clone());
        if let Some(id) = self.active_palette {
            palette.id = id;
        }
        let saved = self.palettes.save(&palette)?;
        self.active_palette = Some(saved.id);
        self.event_bus.emit(StudioEvent::PaletteSaved {
            id: saved.id,
            name: saved.name.clone(),
        });
        Ok(saved)
    }

    pub fn load_palette(&mut self, id: Uuid) -> PersistenceResult<()> {
        let palette = self.palettes.get(id)?;
        self.grid = palette.grid;
        self.active_palette = Some(palette.id);
        self.event_bus.emit(StudioEvent::PaletteLoaded { id });
        Ok(())
    }

    pub fn delete_palette(&mut self, id: Uuid) -> PersistenceResult<()> {
        self.palettes.delete(id)?;
        if self.active_palette == Some(id) {
            self.active_palette = None;
        }
        self.event_bus.emit(StudioEvent::PaletteDeleted { id });
        Ok(())
    }

    // --- export --------------------------------------------------------------

    pub fn exports_dir(&self) -> PathBuf {
        self.config.data_dir.join("exports")
    }

    pub fn export_palette(&self, name: &str) -> Result<PathBuf, ExportError> {
        let path = export::unique_export_path(&self.exports_dir(), name);
        export::save_palette(&self.grid, path)
    }

    pub fn export_painting(&self, name: &str) -> Result<PathBuf, ExportError> {
        let path = export::unique_export_path(&self.exports_dir(), name);
        export::save_painting(&self.engine, path)
    }
}

use std::cell::Cell;
use std::rc::Rc;

use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use serde::{Deserialize, Serialize};

use crate::config::StudioConfig;
use crate::event::{LoggingHandler, StudioEvent};
use crate::grid::GridSize;
use crate::input::{PointerEvent, PointerRouter, PointerSample, SurfaceKind};
use crate::panels;
use crate::state::{Palette, StudioContext};

/// UI preferences restored between runs. Palettes live in the palette store,
/// not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    pub palette_name: String,
    pub grid_size: GridSize,
    pub brush_size: f32,
    pub brush_opacity: f32,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            palette_name: "My palette".to_string(),
            grid_size: GridSize::default(),
            brush_size: 24.0,
            brush_opacity: 0.6,
        }
    }
}

/// What the primary pointer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PointerMode {
    #[default]
    Idle,
    /// Fed to the gesture classifier
    Gesture,
    /// Painting on the canvas
    Stroke,
}

pub struct StudioApp {
    pub(crate) studio: StudioContext,
    pub(crate) prefs: UiPrefs,
    router: PointerRouter,
    mode: PointerMode,
    /// Carousel swatch rects laid out last frame, with their catalog index
    pub(crate) carousel_cells: Vec<(usize, egui::Rect)>,
    /// Grid cell rects in cell order
    pub(crate) grid_cells: Vec<egui::Rect>,
    pub(crate) canvas_texture: Option<TextureHandle>,
    pub(crate) saved_palettes: Vec<Palette>,
    canvas_dirty: Rc<Cell<bool>>,
    pub(crate) status: Option<String>,
}

impl StudioApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: StudioConfig) -> Self {
        let prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_prefs(config, prefs)
    }

    pub fn with_prefs(config: StudioConfig, prefs: UiPrefs) -> Self {
        let mut studio = StudioContext::new(config);
        studio.set_grid_size(prefs.grid_size);
        studio.engine_mut().set_brush_size(prefs.brush_size);
        studio.engine_mut().set_brush_opacity(prefs.brush_opacity);

        let canvas_dirty = Rc::new(Cell::new(true));
        studio.event_bus.subscribe(Box::new(LoggingHandler));
        let dirty = Rc::clone(&canvas_dirty);
        studio.event_bus.subscribe(Box::new(move |event: &StudioEvent| {
            if matches!(
                event,
                StudioEvent::StrokeCompleted { .. }
                    | StudioEvent::CanvasCleared
                    | StudioEvent::HistoryChanged { .. }
            ) {
                dirty.set(true);
            }
        }));

        let mut app = Self {
            studio,
            prefs,
            router: PointerRouter::new(),
            mode: PointerMode::Idle,
            carousel_cells: Vec::new(),
            grid_cells: Vec::new(),
            canvas_texture: None,
            saved_palettes: Vec::new(),
            canvas_dirty,
            status: None,
        };
        app.refresh_saved_palettes();
        app
    }

    pub fn studio(&self) -> &StudioContext {
        &self.studio
    }

    pub(crate) fn mark_canvas_dirty(&self) {
        self.canvas_dirty.set(true);
    }

    pub(crate) fn refresh_saved_palettes(&mut self) {
        match self.studio.palettes().list() {
            Ok(palettes) => self.saved_palettes = palettes,
            Err(err) => self.set_status(format!("Could not read saved palettes: {err}")),
        }
    }

    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.status = Some(message);
    }

    /// Upload the composited painting when it changed since the last frame
    pub(crate) fn refresh_canvas_texture(&mut self, ctx: &egui::Context) {
        if !self.canvas_dirty.replace(false) && self.canvas_texture.is_some() {
            return;
        }
        let composite = self.studio.engine().composite();
        let size = [composite.width() as usize, composite.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, composite.as_raw());
        if let Some(handle) = self.canvas_texture.as_mut() {
            handle.set(image, TextureOptions::LINEAR);
        } else {
            self.canvas_texture = Some(ctx.load_texture("painting", image, TextureOptions::LINEAR));
        }
    }

    fn handle_pointer_events(&mut self, ctx: &egui::Context) {
        for event in self.router.process_input(ctx) {
            match event {
                PointerEvent::Down { sample, surface } => self.pointer_down(sample, surface),
                PointerEvent::Move { sample, .. } => self.pointer_move(ctx, sample),
                PointerEvent::Up { sample, .. } => self.pointer_up(sample),
            }
        }
    }

    fn pointer_down(&mut self, sample: PointerSample, surface: SurfaceKind) {
        self.mode = PointerMode::Idle;
        match surface {
            SurfaceKind::Carousel => {
                let hit = self.carousel_cells.iter().find(|(_, rect)| rect.contains(sample.pos));
                if let Some(&(index, _)) = hit {
                    self.studio.press_carousel(sample, index);
                    self.mode = PointerMode::Gesture;
                }
            }
            SurfaceKind::Grid => {
                if let Some(cell) = self.grid_cells.iter().position(|rect| rect.contains(sample.pos)) {
                    self.studio.press_cell(sample, cell);
                    self.mode = PointerMode::Gesture;
                }
            }
            SurfaceKind::Canvas => {
                let Some(pos) = self.studio.engine().interaction_layer().to_canvas(sample.pos) else {
                    return;
                };
                match self.studio.begin_stroke(pos) {
                    Ok(()) => {
                        self.mode = PointerMode::Stroke;
                        self.mark_canvas_dirty();
                    }
                    Err(err) => self.set_status(err.to_string()),
                }
            }
            SurfaceKind::Elsewhere => self.studio.cancel_gesture(),
        }
    }

    fn pointer_move(&mut self, ctx: &egui::Context, sample: PointerSample) {
        match self.mode {
            PointerMode::Stroke => {
                let Some(pos) = self.studio.engine().interaction_layer().to_canvas(sample.pos) else {
                    return;
                };
                if let Err(err) = self.studio.continue_stroke(pos) {
                    self.set_status(err.to_string());
                }
                self.mark_canvas_dirty();
            }
            PointerMode::Gesture => {
                let response = self.studio.gesture_move(sample, &self.grid_cells);
                if response.suppress_default {
                    ctx.input_mut(|input| input.smooth_scroll_delta = egui::Vec2::ZERO);
                }
            }
            PointerMode::Idle => {}
        }
    }

    fn pointer_up(&mut self, sample: PointerSample) {
        match std::mem::take(&mut self.mode) {
            PointerMode::Stroke => self.studio.end_stroke(),
            PointerMode::Gesture => {
                self.studio.gesture_up(sample, &self.grid_cells);
            }
            PointerMode::Idle => {}
        }
    }

    fn paint_drag_preview(&self, ctx: &egui::Context) {
        let Some(preview) = self.studio.classifier().preview() else {
            return;
        };
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("drag_preview"),
        ));
        let rect = egui::Rect::from_center_size(preview.position, egui::vec2(56.0, 56.0));
        painter.circle_filled(rect.center() + egui::vec2(2.0, 3.0), 28.0, Color32::from_black_alpha(60));
        panels::paint_swatch(&painter, rect, &preview.payload, false);
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    }
}

impl eframe::App for StudioApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.prefs.grid_size = self.studio.grid().size();
        let brush = self.studio.engine().brush();
        self.prefs.brush_size = brush.size;
        self.prefs.brush_opacity = brush.opacity;
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Hit-testing uses the layout from the previous frame
        self.handle_pointer_events(ctx);
        self.router.clear_surfaces();

        panels::controls_panel(self, ctx);
        panels::palette_panel(self, ctx);
        panels::central_panel(self, ctx);

        if let Some(rect) = self.carousel_cells.iter().map(|(_, r)| *r).reduce(|a, b| a.union(b)) {
            self.router.set_carousel_rect(rect);
        }
        if let Some(rect) = self.grid_cells.iter().copied().reduce(|a, b| a.union(b)) {
            self.router.set_grid_rect(rect);
        }
        if let Some(rect) = self.studio.engine().interaction_layer().screen_rect() {
            self.router.set_canvas_rect(rect);
        }

        self.paint_drag_preview(ctx);
        if self.studio.classifier().session().is_some() {
            ctx.request_repaint();
        }
    }
}

use egui::{Pos2, Rect};

use crate::swatch::ColorSwatch;

mod gestures;
mod router;

pub use gestures::{
    DragOverChange, DragPreview, GestureAction, GestureClassifier, GestureConfig, GestureSession,
    GestureState, MoveResponse,
};
pub use router::{PointerEvent, PointerRouter, SurfaceKind};

/// One pointer position captured during a gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pos: Pos2,
    pub timestamp_ms: u64,
}

impl PointerSample {
    pub fn new(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            pos: Pos2::new(x, y),
            timestamp_ms,
        }
    }

    pub fn at(pos: Pos2, timestamp_ms: u64) -> Self {
        Self { pos, timestamp_ms }
    }
}

/// Where a dragged swatch was picked up from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// The scrolling swatch carousel
    Carousel,
    /// A cell of the palette grid
    GridCell(usize),
}

impl DragSource {
    pub fn is_grid_cell(&self) -> bool {
        matches!(self, DragSource::GridCell(_))
    }
}

/// A completed drag that ended over a grid cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropAction {
    pub payload: ColorSwatch,
    pub target_cell: usize,
    pub source: DragSource,
}

impl DropAction {
    pub fn source_is_grid_cell(&self) -> bool {
        self.source.is_grid_cell()
    }
}

/// Finds the grid cell under a pointer position
pub trait HitTester {
    fn cell_at(&self, pos: Pos2) -> Option<usize>;
}

impl<F> HitTester for F
where
    F: Fn(Pos2) -> Option<usize>,
{
    fn cell_at(&self, pos: Pos2) -> Option<usize> {
        self(pos)
    }
}

/// Cell rectangles laid out in index order
impl HitTester for [Rect] {
    fn cell_at(&self, pos: Pos2) -> Option<usize> {
        self.iter().position(|rect| rect.contains(pos))
    }
}

impl HitTester for Vec<Rect> {
    fn cell_at(&self, pos: Pos2) -> Option<usize> {
        self.as_slice().cell_at(pos)
    }
}

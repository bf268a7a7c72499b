use uuid::Uuid;

use crate::grid::GridSize;
use crate::input::{DragOverChange, DropAction};
use crate::swatch::ColorSwatch;

/// Direction the swatch carousel was paged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudioEvent {
    ColorSelected {
        swatch: ColorSwatch,
    },
    SwatchDropped {
        action: DropAction,
        applied: bool,
    },
    CarouselPaged {
        direction: PageDirection,
        page: usize,
    },
    DragOverChanged(DragOverChange),
    GridChanged(GridEvent),
    StrokeCompleted {
        eraser: bool,
    },
    CanvasCleared,
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
    PaletteSaved {
        id: Uuid,
        name: String,
    },
    PaletteLoaded {
        id: Uuid,
    },
    PaletteDeleted {
        id: Uuid,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    CellCleared { index: usize },
    Resized { size: GridSize },
    Reset,
}

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::input::{DragSource, DropAction};
use crate::swatch::ColorSwatch;

/// Side length of the palette grid, restricted to 2, 3 or 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridSize(usize);

impl GridSize {
    pub const SMALL: GridSize = GridSize(2);
    pub const MEDIUM: GridSize = GridSize(3);
    pub const LARGE: GridSize = GridSize(4);

    pub fn all() -> [GridSize; 3] {
        [Self::SMALL, Self::MEDIUM, Self::LARGE]
    }

    pub fn side(&self) -> usize {
        self.0
    }

    pub fn cell_count(&self) -> usize {
        self.0 * self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl TryFrom<usize> for GridSize {
    type Error = GridError;

    fn try_from(side: usize) -> Result<Self, Self::Error> {
        match side {
            2..=4 => Ok(GridSize(side)),
            other => Err(GridError::UnsupportedSize(other)),
        }
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> usize {
        size.0
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Result of applying a drop to the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The swatch now lives in `target`
    Applied { target: usize },
    /// Grid state was left untouched
    Rejected,
}

impl DropOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DropOutcome::Applied { .. })
    }
}

/// The N×N palette grid. Always holds exactly N² slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGrid")]
pub struct GridCellStore {
    size: GridSize,
    cells: Vec<Option<ColorSwatch>>,
}

#[derive(Deserialize)]
struct RawGrid {
    size: GridSize,
    cells: Vec<Option<ColorSwatch>>,
}

impl From<RawGrid> for GridCellStore {
    fn from(raw: RawGrid) -> Self {
        Self::from_cells(raw.size, raw.cells)
    }
}

impl Default for GridCellStore {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

impl GridCellStore {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    /// Rebuild a store from persisted cells, padding or truncating to N²
    pub fn from_cells(size: GridSize, mut cells: Vec<Option<ColorSwatch>>) -> Self {
        cells.resize(size.cell_count(), None);
        Self { size, cells }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn get(&self, index: usize) -> Option<&ColorSwatch> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    pub fn set(&mut self, index: usize, swatch: ColorSwatch) -> Result<(), GridError> {
        let slot = self.slot_mut(index)?;
        *slot = Some(swatch);
        Ok(())
    }

    /// Empty a cell, returning what it held
    pub fn clear(&mut self, index: usize) -> Result<Option<ColorSwatch>, GridError> {
        Ok(self.slot_mut(index)?.take())
    }

    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Change N. Cells whose index falls outside the new N² range are dropped.
    pub fn resize(&mut self, size: GridSize) {
        if size == self.size {
            return;
        }
        let discarded = self
            .cells
            .iter()
            .skip(size.cell_count())
            .filter(|cell| cell.is_some())
            .count();
        if discarded > 0 {
            log::debug!("Resizing grid to {} discards {} swatches", size, discarded);
        }
        self.cells.resize(size.cell_count(), None);
        self.size = size;
    }

    pub fn cells(&self) -> &[Option<ColorSwatch>] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Apply a drop produced by the gesture classifier.
    ///
    /// Carousel drops copy the swatch into the target. Grid drops move it,
    /// swapping with whatever the target held.
    pub fn apply_drop(&mut self, action: &DropAction) -> DropOutcome {
        let target = action.target_cell;
        if target >= self.cells.len() {
            log::warn!("Drop target {} outside grid of {} cells", target, self.cells.len());
            return DropOutcome::Rejected;
        }

        match action.source {
            DragSource::Carousel => {
                self.cells[target] = Some(action.payload.clone());
            }
            DragSource::GridCell(source) => {
                if source == target {
                    return DropOutcome::Rejected;
                }
                if source >= self.cells.len() {
                    log::warn!("Drop source {} outside grid of {} cells", source, self.cells.len());
                    return DropOutcome::Rejected;
                }
                let previous = self.cells[target].replace(action.payload.clone());
                self.cells[source] = previous;
            }
        }

        DropOutcome::Applied { target }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<ColorSwatch>, GridError> {
        let len = self.cells.len();
        self.cells.get_mut(index).ok_or(GridError::OutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swatch::Effect;

    fn swatch(name: &str, hex: &str) -> ColorSwatch {
        ColorSwatch::new(name, hex, Effect::Matte).unwrap()
    }

    #[test]
    fn test_grid_size_bounds() {
        assert!(GridSize::try_from(1).is_err());
        assert_eq!(GridSize::try_from(4).unwrap().cell_count(), 16);
        assert_eq!(GridSize::try_from(5), Err(GridError::UnsupportedSize(5)));
    }

    #[test]
    fn test_set_get_clear() {
        let mut grid = GridCellStore::new(GridSize::SMALL);
        assert_eq!(grid.len(), 4);
        grid.set(2, swatch("Red", "#FF0000")).unwrap();
        assert_eq!(grid.get(2).unwrap().hex_code(), "#FF0000");
        assert_eq!(grid.filled_count(), 1);

        assert_eq!(
            grid.set(4, swatch("Red", "#FF0000")),
            Err(GridError::OutOfRange { index: 4, len: 4 })
        );

        assert!(grid.clear(2).unwrap().is_some());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_resize_discards_out_of_range() {
        let mut grid = GridCellStore::new(GridSize::LARGE);
        grid.set(1, swatch("A", "#111111")).unwrap();
        grid.set(10, swatch("B", "#222222")).unwrap();

        grid.resize(GridSize::SMALL);
        assert_eq!(grid.len(), 4);
        assert!(grid.get(1).is_some());
        assert_eq!(grid.filled_count(), 1);

        grid.resize(GridSize::LARGE);
        assert_eq!(grid.len(), 16);
        assert!(grid.get(10).is_none());
    }

    #[test]
    fn test_grid_drop_swaps() {
        let mut grid = GridCellStore::new(GridSize::MEDIUM);
        let a = swatch("A", "#111111");
        let b = swatch("B", "#222222");
        grid.set(0, a.clone()).unwrap();
        grid.set(5, b.clone()).unwrap();

        let outcome = grid.apply_drop(&DropAction {
            payload: a.clone(),
            target_cell: 5,
            source: DragSource::GridCell(0),
        });
        assert_eq!(outcome, DropOutcome::Applied { target: 5 });
        assert_eq!(grid.get(5), Some(&a));
        assert_eq!(grid.get(0), Some(&b));

        let onto_self = grid.apply_drop(&DropAction {
            payload: a,
            target_cell: 5,
            source: DragSource::GridCell(5),
        });
        assert_eq!(onto_self, DropOutcome::Rejected);
    }

    #[test]
    fn test_persisted_cells_are_normalized() {
        let grid = GridCellStore::from_cells(GridSize::SMALL, vec![None; 9]);
        assert_eq!(grid.len(), 4);
        let json = serde_json::to_string(&grid).unwrap();
        let restored: GridCellStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, grid);
    }
}

use swatch_studio::catalog::{BuiltinCatalog, ColorCatalog};
use swatch_studio::config::StudioConfig;
use swatch_studio::error::PersistenceError;
use swatch_studio::event::StudioEvent;
use swatch_studio::grid::{DropOutcome, GridCellStore, GridSize};
use swatch_studio::input::{DragSource, DropAction, PointerSample};
use swatch_studio::state::{Palette, PaletteStore, StudioContext};
use swatch_studio::swatch::{ColorSwatch, Effect};

fn swatch(name: &str, hex: &str) -> ColorSwatch {
    ColorSwatch::new(name, hex, Effect::Shimmer).unwrap()
}

fn carousel_drop(payload: ColorSwatch, target_cell: usize) -> DropAction {
    DropAction {
        payload,
        target_cell,
        source: DragSource::Carousel,
    }
}

#[test]
fn test_grid_keeps_n_squared_slots_through_resizes() {
    let mut grid = GridCellStore::new(GridSize::LARGE);
    grid.apply_drop(&carousel_drop(swatch("Gold", "#D4AF37"), 3));
    grid.apply_drop(&carousel_drop(swatch("Plum", "#8E4585"), 15));

    grid.resize(GridSize::SMALL);
    assert_eq!(grid.len(), 4);
    assert_eq!(grid.filled_count(), 1);
    assert_eq!(grid.get(3).unwrap().color_name(), "Gold");

    grid.resize(GridSize::MEDIUM);
    assert_eq!(grid.len(), 9);
    assert!(grid.get(8).is_none());
}

#[test]
fn test_grid_is_complete_only_when_every_cell_is_filled() {
    let mut grid = GridCellStore::new(GridSize::SMALL);
    for cell in 0..3 {
        grid.set(cell, swatch("Gold", "#D4AF37")).unwrap();
    }
    assert!(!grid.is_complete());
    grid.set(3, swatch("Plum", "#8E4585")).unwrap();
    assert!(grid.is_complete());

    grid.resize(GridSize::MEDIUM);
    assert!(!grid.is_complete());
}

#[test]
fn test_grid_to_grid_drop_swaps() {
    let mut grid = GridCellStore::new(GridSize::SMALL);
    let gold = swatch("Gold", "#D4AF37");
    let plum = swatch("Plum", "#8E4585");
    grid.set(0, gold.clone()).unwrap();
    grid.set(1, plum.clone()).unwrap();

    let outcome = grid.apply_drop(&DropAction {
        payload: gold.clone(),
        target_cell: 1,
        source: DragSource::GridCell(0),
    });
    assert_eq!(outcome, DropOutcome::Applied { target: 1 });
    assert_eq!(grid.get(0), Some(&plum));
    assert_eq!(grid.get(1), Some(&gold));

    let rejected = grid.apply_drop(&DropAction {
        payload: plum.clone(),
        target_cell: 0,
        source: DragSource::GridCell(0),
    });
    assert_eq!(rejected, DropOutcome::Rejected);
    assert!(!rejected.is_applied());
    assert_eq!(grid.apply_drop(&carousel_drop(plum, 9)), DropOutcome::Rejected);
}

#[test]
fn test_transfer_format_matches_wire_shape() {
    let original = swatch("Rose Gold", "#b76e79");
    let data = original.to_transfer();
    let value: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(value["colorName"], "Rose Gold");
    assert_eq!(value["hexCode"], "#B76E79");
    assert_eq!(value["effect"], "shimmer");

    let decoded = ColorSwatch::from_transfer(&data).unwrap();
    assert_eq!(decoded, original);

    assert!(ColorSwatch::from_transfer(r##"{"colorName":"Bad","hexCode":"#XYZ"}"##).is_err());
}

#[test]
fn test_catalog_lookup() {
    let catalog = BuiltinCatalog::default();
    assert!(!catalog.is_empty());
    assert_eq!(catalog.find_by_hex("9b111e").unwrap().color_name(), "Ruby");
    assert_eq!(catalog.find_by_name(" emerald ").unwrap().effect(), Effect::Sparkly);
    assert!(catalog.find_by_hex("#010203").is_none());
}

#[test]
fn test_palette_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = PaletteStore::new(dir.path());

    let mut grid = GridCellStore::new(GridSize::MEDIUM);
    grid.set(4, swatch("Red", "#FF0000")).unwrap();
    let saved = store.save(&Palette::new("Sunset", grid.clone())).unwrap();

    let reopened = PaletteStore::new(dir.path());
    let loaded = reopened.get(saved.id).unwrap();
    assert_eq!(loaded.grid, grid);
    assert_eq!(loaded.name, "Sunset");

    reopened.delete(saved.id).unwrap();
    assert!(matches!(reopened.get(saved.id), Err(PersistenceError::NotFound(_))));
    assert!(matches!(
        reopened.save(&Palette::new("Empty", GridCellStore::new(GridSize::SMALL))),
        Err(PersistenceError::InvalidPalette(_))
    ));
}

#[test]
fn test_studio_wires_gestures_to_grid_and_events() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = StudioConfig::default();
    config.data_dir = dir.path().to_path_buf();
    let mut studio = StudioContext::new(config);

    let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&events);
    studio
        .event_bus
        .subscribe(Box::new(move |event: &StudioEvent| sink.borrow_mut().push(event.clone())));

    let cells = |pos: egui::Pos2| (pos.y > 300.0).then_some(7usize);
    studio.press_carousel(PointerSample::new(40.0, 40.0, 0), 4);
    studio.gesture_move(PointerSample::new(45.0, 200.0, 16), &cells);
    studio.gesture_move(PointerSample::new(45.0, 320.0, 32), &cells);
    studio.gesture_up(PointerSample::new(45.0, 320.0, 48), &cells);

    assert_eq!(studio.grid().get(7).unwrap().color_name(), "Terracotta");
    // Dropping is not selecting
    assert!(studio.selection().selected().is_none());

    let events = events.borrow();
    assert!(events.iter().any(|e| matches!(e, StudioEvent::SwatchDropped { applied: true, .. })));
    assert!(!events.iter().any(|e| matches!(e, StudioEvent::ColorSelected { .. })));
}

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod grid;
pub mod input;
mod panels;
pub mod selection;
pub mod state;
pub mod swatch;
pub mod util;

pub use app::{StudioApp, UiPrefs};
pub use canvas::PaintEngine;
pub use catalog::{BuiltinCatalog, ColorCatalog};
pub use config::StudioConfig;
pub use grid::{GridCellStore, GridSize};
pub use input::{GestureAction, GestureClassifier};
pub use selection::SelectionStore;
pub use state::StudioContext;
pub use swatch::{ColorSwatch, Effect};

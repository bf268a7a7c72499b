mod carousel;
pub mod context;
mod persistence;

pub use carousel::CarouselState;
pub use context::StudioContext;
pub use persistence::{Palette, PaletteStore};

use std::path::{Path, PathBuf};

use egui::{Color32, Pos2, Vec2};
use image::{ImageFormat, RgbaImage};

use crate::canvas::{Paint, PaintEngine, PaintLayer, RasterSurface};
use crate::error::ExportError;
use crate::grid::GridCellStore;
use crate::swatch::Effect;

/// Pixel size of one exported palette pan
pub const PALETTE_CELL_PX: u32 = 96;
const PALETTE_GAP_PX: u32 = 12;
const PALETTE_BACKGROUND: Color32 = Color32::from_rgb(0x1E, 0x1B, 0x1A);
const EMPTY_PAN: Color32 = Color32::from_rgb(0x3A, 0x36, 0x34);

/// Render the palette grid as a case of round pans
pub fn render_palette(grid: &GridCellStore, cell_px: u32) -> RgbaImage {
    let side = grid.size().side() as u32;
    let extent = side * cell_px + (side + 1) * PALETTE_GAP_PX;
    let mut layer = PaintLayer::new(extent, extent);
    layer.fill(&Paint::color(PALETTE_BACKGROUND, 1.0));

    let radius = cell_px as f32 / 2.0;
    for (index, cell) in grid.cells().iter().enumerate() {
        let (row, col) = (index as u32 / side, index as u32 % side);
        let center = Pos2::new(
            (PALETTE_GAP_PX + col * (cell_px + PALETTE_GAP_PX)) as f32 + radius,
            (PALETTE_GAP_PX + row * (cell_px + PALETTE_GAP_PX)) as f32 + radius,
        );

        let Some(swatch) = cell else {
            layer.fill_circle(center, radius, &Paint::color(EMPTY_PAN, 1.0));
            continue;
        };
        layer.fill_circle(center, radius, &Paint::color(swatch.color(), 1.0));
        draw_finish(&mut layer, center, radius, swatch.effect());
    }

    layer.into_image()
}

fn draw_finish(layer: &mut PaintLayer, center: Pos2, radius: f32, effect: Effect) {
    match effect {
        Effect::Matte => {}
        Effect::Shimmer => {
            let highlight = center + Vec2::new(-radius * 0.3, -radius * 0.3);
            layer.fill_circle(highlight, radius * 0.45, &Paint::color(Color32::WHITE, 0.18));
            layer.fill_circle(highlight, radius * 0.2, &Paint::color(Color32::WHITE, 0.15));
        }
        Effect::Sparkly => {
            // Fixed glitter pattern so exports are reproducible
            for i in 0..12 {
                let angle = i as f32 * 2.399;
                let dist = radius * 0.8 * ((i as f32 + 0.5) / 12.0).sqrt();
                let pos = center + Vec2::angled(angle) * dist;
                layer.fill_circle(pos, (radius * 0.04).max(1.0), &Paint::color(Color32::WHITE, 0.7));
            }
        }
    }
}

/// Write the palette grid to a PNG file
pub fn save_palette(grid: &GridCellStore, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    if grid.is_empty() {
        return Err(ExportError::Empty);
    }
    let image = render_palette(grid, PALETTE_CELL_PX);
    write_png(&image, path.as_ref())
}

/// Write the painted eye, artwork included, to a PNG file
pub fn save_painting(engine: &PaintEngine, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    if !engine.has_any_colors() {
        return Err(ExportError::Empty);
    }
    write_png(&engine.composite(), path.as_ref())
}

/// A file name that does not clash with earlier exports in `dir`
pub fn unique_export_path(dir: &Path, stem: &str) -> PathBuf {
    let slug: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "export" } else { slug };

    let mut candidate = dir.join(format!("{slug}.png"));
    let mut counter = 2;
    while candidate.exists() {
        candidate = dir.join(format!("{slug}-{counter}.png"));
        counter += 1;
    }
    candidate
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image.save_with_format(path, ImageFormat::Png)?;
    log::info!("Exported {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;
    use crate::swatch::ColorSwatch;

    #[test]
    fn test_render_palette_places_swatches() {
        let mut grid = GridCellStore::new(GridSize::SMALL);
        grid.set(3, ColorSwatch::new("Red", "#FF0000", Effect::Matte).unwrap())
            .unwrap();
        let image = render_palette(&grid, 20);

        assert_eq!(image.dimensions(), (2 * 20 + 3 * 12, 2 * 20 + 3 * 12));
        // Center of cell 3 (row 1, col 1)
        let c = 12 + 32 + 10;
        assert_eq!(image.get_pixel(c, c).0, [255, 0, 0, 255]);
        // Center of empty cell 0
        assert_eq!(image.get_pixel(22, 22).0, [0x3A, 0x36, 0x34, 255]);
    }

    #[test]
    fn test_empty_exports_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let grid = GridCellStore::new(GridSize::MEDIUM);
        assert!(matches!(save_palette(&grid, dir.path().join("p.png")), Err(ExportError::Empty)));
    }

    #[test]
    fn test_unique_export_path() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_export_path(dir.path(), "Date Night!");
        assert_eq!(first.file_name().unwrap(), "date-night.png");
        std::fs::write(&first, b"x").unwrap();
        let second = unique_export_path(dir.path(), "Date Night!");
        assert_eq!(second.file_name().unwrap(), "date-night-2.png");
    }
}

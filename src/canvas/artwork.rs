use std::path::{Path, PathBuf};

use egui::{Color32, Pos2, Vec2};
use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::surface::{Paint, PaintLayer, RasterSurface};
use crate::error::ArtworkError;

/// A named illustration that can be rasterized with a recolored iris
pub trait ArtworkSource {
    fn name(&self) -> &str;

    fn rasterize(&self, width: u32, height: u32, iris_color: Color32) -> Result<RgbaImage, ArtworkError>;
}

const SKIN: Color32 = Color32::from_rgb(0xF1, 0xC6, 0xA8);
const SCLERA: Color32 = Color32::from_rgb(0xF8, 0xF4, 0xF0);
const LINER: Color32 = Color32::from_rgb(0x3A, 0x26, 0x1C);
const CREASE: Color32 = Color32::from_rgb(0xC9, 0x97, 0x7E);

/// The built-in eye illustration, drawn from simple vector shapes.
///
/// Everything outside the eye is skin so pigment has somewhere to go.
#[derive(Debug, Clone, Default)]
pub struct EyeArtwork;

impl ArtworkSource for EyeArtwork {
    fn name(&self) -> &str {
        "eye"
    }

    fn rasterize(&self, width: u32, height: u32, iris_color: Color32) -> Result<RgbaImage, ArtworkError> {
        if width == 0 || height == 0 {
            return Err(ArtworkError::InvalidDimensions(width, height));
        }

        let (w, h) = (width as f32, height as f32);
        let mut layer = PaintLayer::new(width, height);
        layer.fill(&Paint::color(SKIN, 1.0));

        let center = Pos2::new(w * 0.5, h * 0.56);
        let eye = Vec2::new(w * 0.30, h * 0.22);

        // Lid crease above the eye
        layer.stroke_ellipse(
            center - Vec2::new(0.0, h * 0.04),
            Vec2::new(eye.x * 1.05, eye.y * 1.9),
            (h * 0.012).max(1.0),
            &Paint::color(CREASE, 0.8),
            -eye.y * 0.9,
        );

        layer.fill_ellipse(center, eye, &Paint::color(SCLERA, 1.0));

        let iris_radius = eye.y * 0.92;
        layer.fill_circle(center, iris_radius, &Paint::color(iris_color, 1.0));
        layer.fill_circle(center, iris_radius * 0.45, &Paint::color(Color32::BLACK, 1.0));
        layer.fill_circle(
            center + Vec2::new(iris_radius * 0.3, -iris_radius * 0.35),
            iris_radius * 0.15,
            &Paint::color(Color32::WHITE, 0.9),
        );

        // Upper lash line, lower lid line
        let liner_width = (h * 0.018).max(1.0);
        layer.stroke_ellipse(center, eye, liner_width, &Paint::color(LINER, 1.0), 0.0);
        layer.stroke_ellipse(center, eye, liner_width * 0.4, &Paint::color(LINER, 0.6), eye.y);

        for i in 0..7 {
            let t = -0.75 + i as f32 * 0.25;
            let base = center + Vec2::new(eye.x * t, -eye.y * (1.0 - t * t).max(0.0).sqrt());
            let tip = base + Vec2::new(eye.x * t * 0.12, -h * 0.07);
            layer.stroke_line(base, tip, liner_width * 0.6, &Paint::color(LINER, 1.0));
        }

        Ok(layer.into_image())
    }
}

/// Artwork loaded from a raster file and scaled to the canvas.
///
/// The iris color has no effect on raster artwork.
#[derive(Debug, Clone)]
pub struct RasterArtwork {
    path: PathBuf,
    name: String,
}

impl RasterArtwork {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artwork".to_string());
        Self { path, name }
    }
}

impl ArtworkSource for RasterArtwork {
    fn name(&self) -> &str {
        &self.name
    }

    fn rasterize(&self, width: u32, height: u32, _iris_color: Color32) -> Result<RgbaImage, ArtworkError> {
        if width == 0 || height == 0 {
            return Err(ArtworkError::InvalidDimensions(width, height));
        }
        let decoded = image::open(&self.path).map_err(|source| ArtworkError::Load {
            name: self.name.clone(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        if rgba.dimensions() == (width, height) {
            return Ok(rgba);
        }
        Ok(imageops::resize(&rgba, width, height, FilterType::Triangle))
    }
}

/// The static illustration beneath the paint layer.
///
/// Redrawn only when the iris color changes. A failed render leaves the
/// layer blank.
pub struct ArtworkLayer {
    source: Box<dyn ArtworkSource>,
    iris_color: Color32,
    image: RgbaImage,
    loaded: bool,
}

impl std::fmt::Debug for ArtworkLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtworkLayer")
            .field("source", &self.source.name())
            .field("iris_color", &self.iris_color)
            .field("loaded", &self.loaded)
            .finish()
    }
}

impl ArtworkLayer {
    pub fn new(source: Box<dyn ArtworkSource>, width: u32, height: u32, iris_color: Color32) -> Self {
        let mut layer = Self {
            source,
            iris_color,
            image: RgbaImage::new(width, height),
            loaded: false,
        };
        layer.render();
        layer
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn iris_color(&self) -> Color32 {
        self.iris_color
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_iris_color(&mut self, color: Color32) {
        if color == self.iris_color && self.loaded {
            return;
        }
        self.iris_color = color;
        self.render();
    }

    fn render(&mut self) {
        let (width, height) = self.image.dimensions();
        match self.source.rasterize(width, height, self.iris_color) {
            Ok(image) => {
                self.image = image;
                self.loaded = true;
            }
            Err(err) => {
                log::warn!("Artwork '{}' unavailable, painting without it: {err}", self.source.name());
                self.image = RgbaImage::new(width, height);
                self.loaded = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_artwork_recolors_iris() {
        let blue = Color32::from_rgb(40, 90, 200);
        let green = Color32::from_rgb(40, 160, 80);
        let mut layer = ArtworkLayer::new(Box::new(EyeArtwork), 600, 350, blue);
        assert!(layer.is_loaded());

        // A point inside the iris ring but outside the pupil
        let (x, y) = (300 + 45, 196);
        assert_eq!(layer.image().get_pixel(x, y).0, [40, 90, 200, 255]);

        layer.set_iris_color(green);
        assert_eq!(layer.image().get_pixel(x, y).0, [40, 160, 80, 255]);
        // Skin is untouched by the recolor
        assert_eq!(layer.image().get_pixel(5, 5).0, [0xF1, 0xC6, 0xA8, 255]);
    }

    #[test]
    fn test_missing_raster_leaves_layer_blank() {
        let source = RasterArtwork::new("/definitely/not/here/eye.png");
        let layer = ArtworkLayer::new(Box::new(source), 60, 35, Color32::BLUE);
        assert!(!layer.is_loaded());
        assert!(layer.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
        assert_eq!(layer.image().dimensions(), (60, 35));
    }
}

use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

/// How a paint operation combines with existing pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    /// Normal painting on top of what is there
    #[default]
    SourceOver,
    /// Punch transparency into the destination; the source color is ignored
    DestinationOut,
}

/// Color, global alpha and compositing mode for one draw operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color32,
    /// Global alpha in 0..=1, applied on top of the color's own alpha
    pub alpha: f32,
    pub composite: Composite,
}

impl Paint {
    pub fn color(color: Color32, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
            composite: Composite::SourceOver,
        }
    }

    pub fn eraser(alpha: f32) -> Self {
        Self {
            color: Color32::BLACK,
            alpha: alpha.clamp(0.0, 1.0),
            composite: Composite::DestinationOut,
        }
    }
}

/// A full-frame copy of a raster surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(RgbaImage);

impl Snapshot {
    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn has_any_pixels(&self) -> bool {
        has_any_pixels(&self.0)
    }
}

/// The drawing operations the painting engine needs from a 2D surface
pub trait RasterSurface {
    fn size(&self) -> [u32; 2];

    /// Filled, antialiased circle
    fn fill_circle(&mut self, center: Pos2, radius: f32, paint: &Paint);

    /// Line segment with round caps, so consecutive segments join round
    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, paint: &Paint);

    fn snapshot(&self) -> Snapshot;

    fn restore(&mut self, snapshot: &Snapshot);

    /// Reset every pixel to fully transparent
    fn clear(&mut self);
}

/// An RGBA raster with straight (non-premultiplied) alpha
#[derive(Debug, Clone, PartialEq)]
pub struct PaintLayer {
    image: RgbaImage,
}

impl PaintLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width() && y < self.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    pub fn has_any_pixels(&self) -> bool {
        has_any_pixels(&self.image)
    }

    /// Paint every pixel with `paint` at full coverage
    pub fn fill(&mut self, paint: &Paint) {
        for pixel in self.image.pixels_mut() {
            blend_pixel(pixel, paint, 1.0);
        }
    }

    /// Filled, antialiased axis-aligned ellipse
    pub fn fill_ellipse(&mut self, center: Pos2, radii: Vec2, paint: &Paint) {
        let min_radius = radii.x.min(radii.y);
        if min_radius <= 0.0 {
            return;
        }
        self.fill_region(center - radii, center + radii, paint, |p| {
            let d = ((p - center) / radii).length();
            (1.0 - d) * min_radius
        });
    }

    /// Outline of an axis-aligned ellipse, limited to `y <= center.y + max_offset_y`
    pub fn stroke_ellipse(&mut self, center: Pos2, radii: Vec2, width: f32, paint: &Paint, max_offset_y: f32) {
        let min_radius = radii.x.min(radii.y);
        if min_radius <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let pad = Vec2::splat(half);
        self.fill_region(center - radii - pad, center + radii + pad, paint, |p| {
            if p.y - center.y > max_offset_y {
                return -1.0;
            }
            let d = ((p - center) / radii).length();
            half - ((1.0 - d) * min_radius).abs()
        });
    }

    /// Blend `paint` over pixels whose center lies in `min..=max`.
    ///
    /// `inside` returns the signed distance in pixels from the shape edge,
    /// positive inside. Coverage ramps across one pixel around the edge.
    fn fill_region(&mut self, min: Pos2, max: Pos2, paint: &Paint, inside: impl Fn(Pos2) -> f32) {
        let (width, height) = (self.image.width() as i64, self.image.height() as i64);
        let x0 = ((min.x - 1.0).floor() as i64).max(0);
        let y0 = ((min.y - 1.0).floor() as i64).max(0);
        let x1 = ((max.x + 1.0).ceil() as i64).min(width);
        let y1 = ((max.y + 1.0).ceil() as i64).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (inside(center) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend_pixel(self.image.get_pixel_mut(x as u32, y as u32), paint, coverage);
                }
            }
        }
    }
}

impl RasterSurface for PaintLayer {
    fn size(&self) -> [u32; 2] {
        [self.image.width(), self.image.height()]
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        let extent = Vec2::splat(radius);
        self.fill_region(center - extent, center + extent, paint, |p| radius - p.distance(center));
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, paint: &Paint) {
        let half = width / 2.0;
        if half <= 0.0 {
            return;
        }
        let extent = Vec2::splat(half);
        let min = from.min(to) - extent;
        let max = from.max(to) + extent;
        self.fill_region(min, max, paint, |p| half - distance_to_segment(p, from, to));
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot(self.image.clone())
    }

    fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.0.dimensions() != self.image.dimensions() {
            log::warn!(
                "Ignoring snapshot of size {:?} for layer of size {:?}",
                snapshot.0.dimensions(),
                self.image.dimensions()
            );
            return;
        }
        self.image.copy_from_slice(snapshot.0.as_raw());
    }

    fn clear(&mut self) {
        self.image.fill(0);
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn has_any_pixels(image: &RgbaImage) -> bool {
    image.pixels().any(|p| p.0[3] > 0)
}

/// Composite `paint` onto one straight-alpha pixel at the given coverage
pub(crate) fn blend_pixel(dst: &mut Rgba<u8>, paint: &Paint, coverage: f32) {
    let src = paint.color.to_srgba_unmultiplied();
    blend_straight(dst, src, paint.alpha * coverage, paint.composite);
}

fn blend_straight(dst: &mut Rgba<u8>, [sr, sg, sb, sa]: [u8; 4], alpha: f32, composite: Composite) {
    let src_alpha = (sa as f32 / 255.0) * alpha;
    if src_alpha <= 0.0 {
        return;
    }
    let dst_alpha = dst.0[3] as f32 / 255.0;

    match composite {
        Composite::SourceOver => {
            let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
            if out_alpha <= 0.0 {
                dst.0 = [0; 4];
                return;
            }
            let mix = |s: u8, d: u8| {
                let value = (s as f32 * src_alpha + d as f32 * dst_alpha * (1.0 - src_alpha)) / out_alpha;
                value.round().clamp(0.0, 255.0) as u8
            };
            dst.0 = [
                mix(sr, dst.0[0]),
                mix(sg, dst.0[1]),
                mix(sb, dst.0[2]),
                (out_alpha * 255.0).round() as u8,
            ];
        }
        Composite::DestinationOut => {
            let out_alpha = ((dst_alpha * (1.0 - src_alpha)) * 255.0).round() as u8;
            if out_alpha == 0 {
                dst.0 = [0; 4];
            } else {
                dst.0[3] = out_alpha;
            }
        }
    }
}

/// Source-over composite of `top` onto `bottom`. Both must share dimensions.
pub fn composite_over(bottom: &RgbaImage, top: &RgbaImage) -> RgbaImage {
    let mut out = bottom.clone();
    for (dst, src) in out.pixels_mut().zip(top.pixels()) {
        blend_straight(dst, src.0, 1.0, Composite::SourceOver);
    }
    out
}

use egui::{Context, Pos2, Rect};

use super::PointerSample;

/// Which part of the window a pointer event landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// The scrolling swatch carousel
    Carousel,
    /// The palette grid
    Grid,
    /// The interaction layer above the painting
    Canvas,
    /// For events not over any registered surface
    Elsewhere,
}

/// Primary-pointer events in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { sample: PointerSample, surface: SurfaceKind },
    Move { sample: PointerSample, surface: SurfaceKind },
    Up { sample: PointerSample, surface: SurfaceKind },
}

/// Converts raw egui input into primary-pointer events tagged with the
/// surface they occurred over.
#[derive(Debug, Default)]
pub struct PointerRouter {
    last_pointer_pos: Option<Pos2>,
    carousel_rect: Option<Rect>,
    grid_rect: Option<Rect>,
    canvas_rect: Option<Rect>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_carousel_rect(&mut self, rect: Rect) {
        self.carousel_rect = Some(rect);
    }

    pub fn set_grid_rect(&mut self, rect: Rect) {
        self.grid_rect = Some(rect);
    }

    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    /// Forget surfaces that were not laid out this frame
    pub fn clear_surfaces(&mut self) {
        self.carousel_rect = None;
        self.grid_rect = None;
        self.canvas_rect = None;
    }

    /// Determine which surface a position is in
    pub fn surface_at(&self, pos: Pos2) -> SurfaceKind {
        let candidates = [
            (self.canvas_rect, SurfaceKind::Canvas),
            (self.grid_rect, SurfaceKind::Grid),
            (self.carousel_rect, SurfaceKind::Carousel),
        ];
        candidates
            .into_iter()
            .find_map(|(rect, kind)| rect.filter(|r| r.contains(pos)).map(|_| kind))
            .unwrap_or(SurfaceKind::Elsewhere)
    }

    /// Process this frame's egui input and generate pointer events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let timestamp_ms = (input.time * 1000.0).max(0.0) as u64;
            let Some(pos) = input.pointer.latest_pos() else {
                self.last_pointer_pos = None;
                return;
            };
            let sample = PointerSample::at(pos, timestamp_ms);
            let surface = self.surface_at(pos);

            if input.pointer.primary_pressed() {
                events.push(PointerEvent::Down { sample, surface });
            } else if input.pointer.primary_down() && Some(pos) != self.last_pointer_pos {
                events.push(PointerEvent::Move { sample, surface });
            }

            if input.pointer.primary_released() {
                events.push(PointerEvent::Up { sample, surface });
            }

            self.last_pointer_pos = Some(pos);
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_surface_lookup() {
        let mut router = PointerRouter::new();
        router.set_carousel_rect(Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 80.0)));
        router.set_grid_rect(Rect::from_min_max(pos2(0.0, 100.0), pos2(300.0, 400.0)));

        assert_eq!(router.surface_at(pos2(10.0, 10.0)), SurfaceKind::Carousel);
        assert_eq!(router.surface_at(pos2(10.0, 150.0)), SurfaceKind::Grid);
        assert_eq!(router.surface_at(pos2(350.0, 350.0)), SurfaceKind::Elsewhere);

        router.clear_surfaces();
        assert_eq!(router.surface_at(pos2(10.0, 10.0)), SurfaceKind::Elsewhere);
    }
}

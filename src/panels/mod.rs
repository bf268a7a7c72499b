mod central_panel;
mod controls_panel;
mod palette_panel;

pub use central_panel::central_panel;
pub use controls_panel::controls_panel;
pub use palette_panel::palette_panel;

use egui::{Align2, Color32, FontId, Painter, Rect, Stroke};

use crate::swatch::{ColorSwatch, Effect};

const SELECTED_RING: Color32 = Color32::from_rgb(0xF5, 0xC5, 0x42);

/// Draw a swatch as a round pan with its finish and name
pub(crate) fn paint_swatch(painter: &Painter, rect: Rect, swatch: &ColorSwatch, selected: bool) {
    let radius = rect.width().min(rect.height()) / 2.0 - 2.0;
    let center = rect.center();
    painter.circle_filled(center, radius, swatch.color());

    match swatch.effect() {
        Effect::Matte => {}
        Effect::Shimmer => {
            let highlight = center + egui::vec2(-radius * 0.3, -radius * 0.3);
            painter.circle_filled(highlight, radius * 0.45, Color32::from_white_alpha(40));
        }
        Effect::Sparkly => {
            for i in 0..8 {
                let angle = i as f32 * 2.399;
                let dist = radius * 0.75 * ((i as f32 + 0.5) / 8.0).sqrt();
                let pos = center + egui::Vec2::angled(angle) * dist;
                painter.circle_filled(pos, 1.2, Color32::from_white_alpha(180));
            }
        }
    }

    if selected {
        painter.circle_stroke(center, radius + 1.0, Stroke::new(3.0, SELECTED_RING));
    }
    painter.text(
        center,
        Align2::CENTER_CENTER,
        swatch.color_name(),
        FontId::proportional((radius / 3.0).clamp(8.0, 12.0)),
        swatch.label_color(),
    );
}

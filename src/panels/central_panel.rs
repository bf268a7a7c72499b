use egui::{Color32, Rect, Sense};

use crate::StudioApp;

pub fn central_panel(app: &mut StudioApp, ctx: &egui::Context) {
    app.refresh_canvas_texture(ctx);

    egui::CentralPanel::default().show(ctx, |ui| {
        let [width, height] = app.studio.engine().size();
        let canvas_size = egui::vec2(width as f32, height as f32);
        let available = ui.available_size();
        let scale = (available.x / canvas_size.x).min(available.y / canvas_size.y).max(0.1);

        let (response, painter) = ui.allocate_painter(canvas_size * scale, Sense::hover());
        let rect = response.rect;
        app.studio.engine_mut().interaction_layer_mut().set_screen_rect(rect);

        painter.rect_filled(rect, 4.0, Color32::WHITE);
        if let Some(texture) = &app.canvas_texture {
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }

        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        }
        if !app.studio.engine().has_any_colors() {
            ui.weak("Pick a shade and paint on the eye");
        }
    });
}

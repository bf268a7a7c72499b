use crate::StudioApp;

pub fn controls_panel(app: &mut StudioApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            let can_undo = app.studio.engine().can_undo();
            let can_redo = app.studio.engine().can_redo();

            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                app.studio.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                app.studio.redo();
            }
            if ui.button("Clear").clicked() {
                app.studio.clear_canvas();
            }

            ui.separator();

            let brush = app.studio.engine().brush();
            let (min, max) = app.studio.engine().brush_size_range();
            let mut size = brush.size;
            if ui.add(egui::Slider::new(&mut size, min..=max).text("Size")).changed() {
                app.studio.engine_mut().set_brush_size(size);
            }
            let mut opacity = brush.opacity;
            if ui.add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("Opacity")).changed() {
                app.studio.engine_mut().set_brush_opacity(opacity);
            }
            let mut eraser = brush.eraser;
            if ui.toggle_value(&mut eraser, "Eraser").changed() {
                app.studio.engine_mut().set_eraser_mode(eraser);
            }

            ui.separator();

            ui.label("Iris");
            let mut iris = app.studio.engine().iris_color();
            if ui.color_edit_button_srgba(&mut iris).changed() {
                app.studio.set_iris_color(iris);
                app.mark_canvas_dirty();
            }

            ui.separator();

            if ui.button("Export palette").clicked() {
                let name = app.prefs.palette_name.clone();
                match app.studio.export_palette(&name) {
                    Ok(path) => app.set_status(format!("Palette exported to {}", path.display())),
                    Err(err) => app.set_status(format!("Palette export failed: {err}")),
                }
            }
            if ui.button("Export look").clicked() {
                let name = format!("{} look", app.prefs.palette_name);
                match app.studio.export_painting(&name) {
                    Ok(path) => app.set_status(format!("Look exported to {}", path.display())),
                    Err(err) => app.set_status(format!("Look export failed: {err}")),
                }
            }
        });

        if let Some(status) = &app.status {
            ui.small(status);
        }
    });
}

use egui::{Color32, Sense, Stroke};

use super::paint_swatch;
use crate::event::PageDirection;
use crate::grid::GridSize;
use crate::StudioApp;

const CAROUSEL_CELL: f32 = 56.0;
const MAX_GRID_CELL: f32 = 72.0;
const EMPTY_CELL: Color32 = Color32::from_rgb(0x3A, 0x36, 0x34);
const HOVER_OUTLINE: Color32 = Color32::from_rgb(0x8A, 0xD1, 0xFF);

pub fn palette_panel(app: &mut StudioApp, ctx: &egui::Context) {
    egui::SidePanel::left("palette_panel")
        .resizable(true)
        .default_width(380.0)
        .show(ctx, |ui| {
            ui.heading("Shades");
            match app.studio.selection().selected() {
                Some(swatch) => ui.label(format!(
                    "Selected: {} ({}, {})",
                    swatch.color_name(),
                    swatch.hex_code(),
                    swatch.effect().label()
                )),
                None => ui.weak("Tap a shade to paint with it"),
            };

            carousel(app, ui);
            ui.separator();
            grid(app, ui);
            ui.separator();
            saved_palettes(app, ui);
        });
}

fn carousel(app: &mut StudioApp, ui: &mut egui::Ui) {
    app.carousel_cells.clear();
    ui.horizontal(|ui| {
        let carousel = *app.studio.carousel();
        if ui.add_enabled(carousel.page() > 0, egui::Button::new("<")).clicked() {
            app.studio.page_carousel(PageDirection::Previous);
        }

        let visible: Vec<_> = app.studio.visible_swatches().map(|(i, s)| (i, s.clone())).collect();
        for (index, swatch) in visible {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(CAROUSEL_CELL, CAROUSEL_CELL), Sense::hover());
            let selected = app.studio.selection().is_selected(&swatch);
            paint_swatch(ui.painter(), rect, &swatch, selected);
            app.carousel_cells.push((index, rect));
        }

        let has_next = carousel.page() + 1 < carousel.page_count();
        if ui.add_enabled(has_next, egui::Button::new(">")).clicked() {
            app.studio.page_carousel(PageDirection::Next);
        }
    });
    let carousel = app.studio.carousel();
    ui.weak(format!("Page {} of {}", carousel.page() + 1, carousel.page_count()));
}

fn grid(app: &mut StudioApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.strong("Palette");
        let mut size = app.studio.grid().size();
        egui::ComboBox::from_id_salt("grid_size")
            .selected_text(size.to_string())
            .show_ui(ui, |ui| {
                for option in GridSize::all() {
                    ui.selectable_value(&mut size, option, option.to_string());
                }
            });
        if size != app.studio.grid().size() {
            app.studio.set_grid_size(size);
        }
        if app.studio.grid().is_complete() {
            ui.weak("complete");
        } else {
            ui.weak(format!("{}/{} filled", app.studio.grid().filled_count(), size.cell_count()));
        }
    });

    let side = app.studio.grid().size().side();
    let spacing = ui.spacing().item_spacing.x;
    let cell = ((ui.available_width() - spacing * (side as f32 - 1.0)) / side as f32).min(MAX_GRID_CELL);
    let hovered = app.studio.classifier().hovered_cell();

    app.grid_cells.clear();
    let mut to_clear = None;
    for row in 0..side {
        ui.horizontal(|ui| {
            for col in 0..side {
                let index = row * side + col;
                let (rect, response) = ui.allocate_exact_size(egui::vec2(cell, cell), Sense::click());
                let painter = ui.painter();
                match app.studio.grid().get(index) {
                    Some(swatch) => paint_swatch(painter, rect, swatch, false),
                    None => {
                        painter.circle_filled(rect.center(), cell / 2.0 - 2.0, EMPTY_CELL);
                    }
                }
                if hovered == Some(index) {
                    painter.circle_stroke(rect.center(), cell / 2.0, Stroke::new(2.0, HOVER_OUTLINE));
                }
                if response.secondary_clicked() {
                    to_clear = Some(index);
                }
                app.grid_cells.push(rect);
            }
        });
    }
    if let Some(index) = to_clear {
        app.studio.clear_cell(index);
    }
    ui.weak("Drag shades into the pans. Right-click a pan to empty it.");
}

fn saved_palettes(app: &mut StudioApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut app.prefs.palette_name);
        if ui.button("Save").clicked() {
            let name = app.prefs.palette_name.clone();
            match app.studio.save_palette(&name) {
                Ok(saved) => {
                    app.set_status(format!("Saved '{}'", saved.name));
                    app.refresh_saved_palettes();
                }
                Err(err) => app.set_status(format!("Could not save palette: {err}")),
            }
        }
        if ui.button("New").clicked() {
            app.studio.new_palette();
        }
    });

    let active = app.studio.active_palette();
    let mut load = None;
    let mut delete = None;
    egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
        for palette in &app.saved_palettes {
            ui.horizontal(|ui| {
                let label = format!("{} ({} shades)", palette.name, palette.grid.filled_count());
                if ui.selectable_label(active == Some(palette.id), label).clicked() {
                    load = Some((palette.id, palette.name.clone()));
                }
                if ui.small_button("Delete").clicked() {
                    delete = Some(palette.id);
                }
            });
        }
    });

    if let Some((id, name)) = load {
        match app.studio.load_palette(id) {
            Ok(()) => {
                app.prefs.palette_name = name;
            }
            Err(err) => app.set_status(format!("Could not load palette: {err}")),
        }
    }
    if let Some(id) = delete {
        match app.studio.delete_palette(id) {
            Ok(()) => app.refresh_saved_palettes(),
            Err(err) => app.set_status(format!("Could not delete palette: {err}")),
        }
    }
}

//! Modal dialogs: welcome screen and per-layer info.

use crate::state::AppState;
use eframe::egui::{self, Color32, RichText};

pub fn render_modals(ctx: &egui::Context, state: &mut AppState) {
    render_welcome(ctx, state);
    render_layer_info(ctx, state);
}

fn render_welcome(ctx: &egui::Context, state: &mut AppState) {
    if !state.welcome_open {
        return;
    }

    let mut open = true;
    egui::Window::new("Welcome to SatView")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                "Browse near-real-time satellite imagery on a world map. \
                 Step through the timeline in 10-minute increments, or press \
                 play to animate it.",
            );
            ui.add_space(6.0);
            ui.label(RichText::new("Tips").strong());
            ui.label("\u{2022} Click the date, hour, or minute in the top bar to step that field.");
            ui.label("\u{2022} Only one imagery layer can be active at a time.");
            ui.label("\u{2022} The daily VIIRS layer disables sub-day navigation and playback.");
            ui.add_space(8.0);

            let mut dont_show = state.settings.dont_show_welcome;
            if ui.checkbox(&mut dont_show, "Don't show this again").changed() {
                state.settings.dont_show_welcome = dont_show;
                state.settings.save();
            }

            ui.add_space(4.0);
            if ui.button("Get started").clicked() {
                state.welcome_open = false;
            }
        });
    if !open {
        state.welcome_open = false;
    }
}

fn render_layer_info(ctx: &egui::Context, state: &mut AppState) {
    let Some(source) = state.info_open else {
        return;
    };
    let info = source.info();

    let mut open = true;
    egui::Window::new(info.title)
        .open(&mut open)
        .collapsible(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(info.description);
            ui.add_space(6.0);

            egui::Grid::new("layer_info_grid")
                .num_columns(2)
                .spacing([12.0, 3.0])
                .show(ui, |ui| {
                    info_row(ui, "Source", info.provider);
                    info_row(ui, "Temporal resolution", info.temporal_resolution);
                    info_row(ui, "Spatial resolution", info.spatial_resolution);
                    info_row(ui, "Coverage", info.coverage);
                });

            if let Some(note) = info.note {
                ui.add_space(6.0);
                ui.label(
                    RichText::new(note)
                        .size(11.0)
                        .color(Color32::from_rgb(200, 180, 100)),
                );
            }

            ui.add_space(6.0);
            ui.hyperlink_to("Data source", info.source_url);
        });
    if !open {
        state.info_open = None;
    }
}

fn info_row(ui: &mut egui::Ui, name: &str, value: &str) {
    ui.label(RichText::new(name).size(11.0).color(Color32::GRAY));
    ui.label(RichText::new(value).size(11.0));
    ui.end_row();
}

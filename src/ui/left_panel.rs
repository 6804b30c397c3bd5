//! Left panel UI: imagery layers, overlays, and basemap selection.

use crate::map::{coordinator::LayerCoordinator, TileMap};
use crate::sources::DataSource;
use crate::state::{clock, AppState, Basemap, OverlayLayer};
use eframe::egui::{self, RichText, ScrollArea};
use egui_phosphor::regular as icons;

pub fn render_left_panel(
    ctx: &egui::Context,
    state: &mut AppState,
    coordinator: &mut LayerCoordinator,
    map: &mut dyn TileMap,
) {
    egui::SidePanel::left("left_panel")
        .resizable(true)
        .default_width(230.0)
        .min_width(190.0)
        .max_width(350.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Layers");
                ui.separator();

                render_imagery_section(ui, state, coordinator, map);
                ui.add_space(5.0);

                render_overlays_section(ui, state, coordinator, map);
                ui.add_space(5.0);

                render_basemap_section(ui, state, coordinator, map);
            });
        });
}

fn render_imagery_section(
    ui: &mut egui::Ui,
    state: &mut AppState,
    coordinator: &mut LayerCoordinator,
    map: &mut dyn TileMap,
) {
    egui::CollapsingHeader::new(RichText::new("Satellite Imagery").strong())
        .default_open(true)
        .show(ui, |ui| {
            let now = clock::now_utc();
            for source in DataSource::ALL {
                ui.horizontal(|ui| {
                    let visible = state.layers.is_imagery_active(source);
                    if eye_button(ui, visible).clicked() {
                        let AppState {
                            timeline,
                            playback,
                            layers,
                            ..
                        } = state;
                        coordinator.toggle_imagery(
                            map,
                            layers,
                            playback,
                            source,
                            timeline.current(),
                            now,
                        );
                    }
                    if ui
                        .button(RichText::new(icons::INFO).size(13.0))
                        .on_hover_text("About this layer")
                        .clicked()
                    {
                        state.info_open = Some(source);
                    }
                    ui.label(RichText::new(source.label()).size(12.0));
                });
            }
        });
}

fn render_overlays_section(
    ui: &mut egui::Ui,
    state: &mut AppState,
    coordinator: &mut LayerCoordinator,
    map: &mut dyn TileMap,
) {
    egui::CollapsingHeader::new(RichText::new("Overlays").strong())
        .default_open(true)
        .show(ui, |ui| {
            for overlay in OverlayLayer::ALL {
                ui.horizontal(|ui| {
                    let visible = state.layers.is_overlay_visible(overlay);
                    if eye_button(ui, visible).clicked() {
                        coordinator.toggle_overlay(map, &mut state.layers, overlay);
                    }
                    ui.label(RichText::new(overlay.label()).size(12.0));
                });
            }
        });
}

fn render_basemap_section(
    ui: &mut egui::Ui,
    state: &mut AppState,
    coordinator: &mut LayerCoordinator,
    map: &mut dyn TileMap,
) {
    egui::CollapsingHeader::new(RichText::new("Basemap").strong())
        .default_open(true)
        .show(ui, |ui| {
            for basemap in Basemap::ALL {
                if ui
                    .radio(state.layers.basemap == basemap, basemap.label())
                    .clicked()
                {
                    coordinator.set_basemap(map, &mut state.layers, basemap);
                }
            }
        });
}

fn eye_button(ui: &mut egui::Ui, visible: bool) -> egui::Response {
    let icon = if visible { icons::EYE } else { icons::EYE_SLASH };
    ui.button(RichText::new(icon).size(14.0))
        .on_hover_text(if visible { "Hide layer" } else { "Show layer" })
}

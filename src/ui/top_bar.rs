//! Top bar UI: app title, observation time display, and status.

use crate::state::{clock, AppState};
use eframe::egui::{self, Color32, RichText};

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // App title
                ui.label(
                    RichText::new("SatView")
                        .strong()
                        .size(16.0)
                        .color(Color32::WHITE),
                );

                ui.separator();

                // Clickable time fields: each click steps that field forward.
                let fields = state.timeline.display_fields();
                let now = clock::now_utc();
                let daily = state.layers.daily_active();

                let date_text = format!("{} {}", fields.day, fields.month_name);
                if time_field(ui, &date_text, true).clicked() {
                    state.timeline.cycle_day(now);
                }
                if time_field(ui, &fields.hour, !daily).clicked() {
                    state.timeline.cycle_hour(now);
                }
                ui.label(RichText::new(":").monospace().size(14.0));
                if time_field(ui, &fields.minute, !daily).clicked() {
                    state.timeline.cycle_minute(now);
                }
                ui.label(RichText::new("UTC").size(11.0).color(Color32::GRAY));

                ui.separator();

                // Status text
                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(Color32::GRAY),
                );
            });
        });
}

fn time_field(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(text).monospace().size(14.0)).frame(false),
    )
}

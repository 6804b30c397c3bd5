//! Bottom panel UI: timeline navigation and playback controls.

use crate::state::{clock, AppState, PlaybackSpeed};
use eframe::egui::{self, RichText};
use egui_phosphor::regular as icons;

pub fn render_bottom_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::bottom("bottom_panel")
        .exact_height(48.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let now = clock::now_utc();
                let daily = state.layers.daily_active();

                render_step_column(ui, state, StepField::Day, true, now);
                render_step_column(ui, state, StepField::Hour, !daily, now);
                render_step_column(ui, state, StepField::Minute, !daily, now);

                ui.separator();

                render_playback_controls(ui, state, daily, now);
            });
        });
}

#[derive(Clone, Copy)]
enum StepField {
    Day,
    Hour,
    Minute,
}

impl StepField {
    fn label(&self) -> &'static str {
        match self {
            StepField::Day => "Day",
            StepField::Hour => "Hour",
            StepField::Minute => "Min",
        }
    }
}

fn render_step_column(
    ui: &mut egui::Ui,
    state: &mut AppState,
    field: StepField,
    enabled: bool,
    now: chrono::DateTime<chrono::Utc>,
) {
    ui.add_enabled_ui(enabled, |ui| {
        ui.label(RichText::new(field.label()).size(11.0));
        if ui
            .button(RichText::new(icons::CARET_UP).size(13.0))
            .clicked()
        {
            match field {
                StepField::Day => state.timeline.advance_day(now),
                StepField::Hour => state.timeline.advance_hour(now),
                StepField::Minute => state.timeline.advance_minute(now),
            };
        }
        if ui
            .button(RichText::new(icons::CARET_DOWN).size(13.0))
            .clicked()
        {
            match field {
                StepField::Day => state.timeline.retreat_day(),
                StepField::Hour => state.timeline.retreat_hour(),
                StepField::Minute => state.timeline.retreat_minute(),
            }
        }
    });
    ui.add_space(4.0);
}

fn render_playback_controls(
    ui: &mut egui::Ui,
    state: &mut AppState,
    daily: bool,
    now: chrono::DateTime<chrono::Utc>,
) {
    let play_icon = if state.playback.is_playing() {
        icons::PAUSE
    } else {
        icons::PLAY
    };

    // Daily imagery has no sub-day frames, so playback is unavailable.
    if ui
        .add_enabled(!daily, egui::Button::new(RichText::new(play_icon).size(15.0)))
        .clicked()
    {
        state.playback.toggle(&mut state.timeline, now, daily);
    }

    ui.separator();

    ui.label(RichText::new("Speed:").size(11.0));
    let mut speed = state.playback.speed();
    egui::ComboBox::from_id_salt("speed_selector")
        .selected_text(speed.label())
        .width(55.0)
        .show_ui(ui, |ui| {
            for option in PlaybackSpeed::all() {
                ui.selectable_value(&mut speed, *option, option.label());
            }
        });
    if speed != state.playback.speed() {
        state.playback.set_speed(speed);
    }
}

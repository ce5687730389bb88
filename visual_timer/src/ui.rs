//! UI module - egui control panel
//!
//! Numeric duration entry, the Start/Pause button, and the settings block
//! (dial maximum, sound). Interactions are returned in a [`UiResult`] that
//! the model applies after the egui frame ends.

use nannou_egui::egui;
use shared::{Mode, TimerSnapshot};

/// Result of control-panel interactions
#[derive(Default)]
pub struct UiResult {
    /// If true, toggle between running and paused
    pub toggle_run: bool,
    /// If Some, set the remaining time to this many seconds (and pause)
    pub set_seconds: Option<f64>,
    /// If Some, apply a new dial maximum in seconds
    pub new_max_seconds: Option<f64>,
    /// If true, the sound checkbox was flipped
    pub sound_changed: bool,
}

/// Draw the control panel.
pub fn draw_control_panel(
    ctx: &egui::Context,
    snapshot: &TimerSnapshot,
    sound_enabled: &mut bool,
    max_entry_secs: &mut f64,
) -> UiResult {
    let mut result = UiResult::default();

    egui::Window::new("Timer")
        .collapsible(false)
        .resizable(false)
        .default_width(220.0)
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .show(ctx, |ui| {
            let total = snapshot.remaining.as_secs_f64().round() as u64;
            ui.label(format!("{:02}:{:02} remaining", total / 60, total % 60));

            ui.horizontal(|ui| {
                ui.label("Seconds:");
                let mut entry = snapshot.remaining.as_secs_f64().round();
                let response = ui.add(
                    egui::DragValue::new(&mut entry)
                        .clamp_range(0.0..=snapshot.max_duration.as_secs_f64())
                        .speed(0.25),
                );
                if response.changed() {
                    result.set_seconds = Some(entry);
                }
            });

            let button_label = match snapshot.mode {
                Mode::Running => "Pause",
                Mode::Paused => "Start",
            };
            if ui.button(button_label).clicked() {
                result.toggle_run = true;
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Dial maximum (s):");
                ui.add(
                    egui::DragValue::new(max_entry_secs)
                        .clamp_range(1.0..=3600.0)
                        .speed(1.0),
                );
                if ui.button("Apply").clicked() {
                    result.new_max_seconds = Some(*max_entry_secs);
                }
            });

            if ui.checkbox(sound_enabled, "Sound on expiry").changed() {
                result.sound_changed = true;
            }

            ui.separator();
            ui.label("Drag the dial or click a tick mark to set the timer. Space toggles, R resets.");
        });

    result
}

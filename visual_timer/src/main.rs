//! Visual Timer
//!
//! A countdown timer presented as a circular dial: drag around the ring or
//! click a tick mark to set a duration, release to let it run down in real
//! time, and a desktop alert fires at zero.

mod alert;
mod drawing;
mod ui;

use std::time::Duration;

use nannou::prelude::*;
use nannou_egui::{self, Egui};
use shared::{
    default_segments, load_config, save_config, Alert, DialConfig, DialMapper, DragController,
    Mode, Segment, TimerEngine,
};

use crate::alert::DesktopAlert;
use crate::drawing::{colors, DialLayout};
use crate::ui::draw_control_panel;

fn main() {
    nannou::app(model).update(update).run();
}

/// Application state
struct Model {
    /// The countdown state machine with its injected alert
    engine: TimerEngine<DesktopAlert>,
    /// Gesture adapter; also owns the dial mapper
    drag: DragController,
    /// Current urgency banding, rebuilt when the maximum changes
    segments: Vec<Segment>,
    /// Whether a ring drag is in progress
    dragging: bool,
    /// Entry field for the dial maximum, applied from the control panel
    max_entry_secs: f64,
    sound_enabled: bool,
    /// egui integration
    egui: Egui,
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Visual Timer")
        .size(900, 700)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .mouse_released(mouse_released)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load saved settings, falling back to defaults
    let config: DialConfig = match load_config() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            DialConfig::default()
        }
    };

    // A hand-edited settings file could carry a nonsense maximum; the dial
    // needs a positive one.
    let max_secs = config.max_duration_secs.clamp(1.0, 3600.0);
    let max_duration = Duration::from_secs_f64(max_secs);
    let mapper = DialMapper::new(max_duration).unwrap();
    let engine = TimerEngine::new(max_duration, DesktopAlert::new(config.sound_enabled)).unwrap();

    Model {
        engine,
        drag: DragController::new(mapper),
        segments: default_segments(max_duration),
        dragging: false,
        max_entry_secs: max_secs,
        sound_enabled: config.sound_enabled,
        egui,
    }
}

fn save_settings(model: &Model) {
    let config = DialConfig {
        max_duration_secs: model.engine.max_duration().as_secs_f64(),
        sound_enabled: model.sound_enabled,
    };
    if let Err(e) = save_config(&config) {
        eprintln!("Failed to save config: {}", e);
    }
}

/// Apply a new dial maximum: the engine clamps its remaining time, and the
/// mapper and segment table are rebuilt around the new bound.
fn apply_max_duration(model: &mut Model, secs: f64) {
    let max_duration = Duration::from_secs_f64(secs.clamp(1.0, 3600.0));
    if model.engine.set_max_duration(max_duration).is_err() {
        return;
    }
    if let Ok(mapper) = DialMapper::new(max_duration) {
        model.drag = DragController::new(mapper);
    }
    model.segments = default_segments(max_duration);
    model.max_entry_secs = max_duration.as_secs_f64();
    save_settings(model);
}

fn toggle_run(model: &mut Model) {
    model.engine.alert_mut().arm();
    match model.engine.mode() {
        Mode::Running => model.engine.pause(),
        Mode::Paused => model.engine.start(),
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    // Observe the wake-up; expiry pauses the engine and plays the alert.
    model.engine.tick();

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let snapshot = model.engine.snapshot();
    let mut sound_enabled = model.sound_enabled;
    let mut max_entry = model.max_entry_secs;
    let result = draw_control_panel(&ctx, &snapshot, &mut sound_enabled, &mut max_entry);
    drop(ctx);

    model.max_entry_secs = max_entry;

    if result.sound_changed {
        model.sound_enabled = sound_enabled;
        model.engine.alert_mut().set_sound_enabled(sound_enabled);
        save_settings(model);
    }

    // Typing a duration parks the countdown, like grabbing the dial.
    if let Some(secs) = result.set_seconds {
        model.engine.pause();
        model.engine.set_remaining(Duration::from_secs_f64(secs.max(0.0)));
    }

    if result.toggle_run {
        toggle_run(model);
    }

    if let Some(secs) = result.new_max_seconds {
        apply_max_duration(model, secs);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(colors::BACKGROUND);

    let layout = DialLayout::calculate(app.window_rect());
    let snapshot = model.engine.snapshot();
    let mapper = model.drag.mapper();
    let max_secs = mapper.max_duration().as_secs();

    drawing::draw_face(&draw, &layout);
    drawing::draw_segment_bands(&draw, &layout, &model.segments, mapper);
    drawing::draw_remaining_wedge(&draw, &layout, &snapshot, &model.segments, mapper);
    drawing::draw_tick_marks(&draw, &layout, max_secs);
    drawing::draw_labels(&draw, &layout, max_secs);
    drawing::draw_hand(&draw, &layout, mapper.duration_to_angle(snapshot.remaining));
    drawing::draw_readout(&draw, &layout, &snapshot);

    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    // The first gesture arms the alert for platforms that gate audio on
    // user input.
    model.engine.alert_mut().arm();

    let pos = app.mouse.position();
    let layout = DialLayout::calculate(app.window_rect());
    let max_secs = model.drag.mapper().max_duration().as_secs();

    // A tick tap commits immediately, same transitions as releasing a drag
    // at that duration.
    if let Some(seconds) = layout.hit_test_tick(pos, max_secs) {
        model.drag.tap_tick(&mut model.engine, seconds);
        return;
    }

    if layout.contains_dial(pos) {
        model.dragging = true;
        let (x, y) = layout.dial_local(pos);
        model.drag.drag_start(&mut model.engine, x, y);
    }
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    if !model.dragging {
        return;
    }
    let layout = DialLayout::calculate(app.window_rect());
    let (x, y) = layout.dial_local(pos);
    model.drag.drag_move(&mut model.engine, x, y);
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || !model.dragging {
        return;
    }
    model.dragging = false;
    let pos = app.mouse.position();
    let layout = DialLayout::calculate(app.window_rect());
    let (x, y) = layout.dial_local(pos);
    model.drag.drag_end(&mut model.engine, x, y);
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // Space toggles start/pause, like the panel button
        Key::Space => toggle_run(model),
        // R clears the dial
        Key::R => model.engine.set_remaining(Duration::ZERO),
        _ => {}
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);
}

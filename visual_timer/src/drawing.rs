//! Drawing module - dial face, segment bands, ticks, labels, and hand
//!
//! Renders the countdown dial using nannou's Draw API. All geometry is
//! derived from [`DialLayout`], which also provides the hit tests the
//! mouse handlers use.

use std::f64::consts::{FRAC_PI_2, TAU};

use nannou::prelude::*;
use shared::{segment_for, DialMapper, Mode, Segment, TimerSnapshot};

/// Color palette for the dial
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 0,
        green: 110,
        blue: 110,
        standard: std::marker::PhantomData,
    };
    pub const FACE: Srgb<u8> = Srgb {
        red: 250,
        green: 250,
        blue: 248,
        standard: std::marker::PhantomData,
    };
    pub const FACE_EDGE: Srgb<u8> = Srgb {
        red: 0,
        green: 77,
        blue: 77,
        standard: std::marker::PhantomData,
    };
    pub const HAND: Srgb<u8> = Srgb {
        red: 0,
        green: 105,
        blue: 92,
        standard: std::marker::PhantomData,
    };
    pub const TICK_NORMAL: Srgb<u8> = Srgb {
        red: 150,
        green: 150,
        blue: 150,
        standard: std::marker::PhantomData,
    };
    pub const TICK_MAJOR: Srgb<u8> = Srgb {
        red: 90,
        green: 90,
        blue: 90,
        standard: std::marker::PhantomData,
    };
    pub const LABEL: Srgb<u8> = Srgb {
        red: 60,
        green: 60,
        blue: 60,
        standard: std::marker::PhantomData,
    };
    pub const READOUT: Srgb<u8> = Srgb {
        red: 40,
        green: 40,
        blue: 40,
        standard: std::marker::PhantomData,
    };
    pub const STATUS: Srgb<u8> = Srgb {
        red: 130,
        green: 130,
        blue: 130,
        standard: std::marker::PhantomData,
    };
}

/// Convert a dial angle (radians clockwise from twelve o'clock) to
/// nannou's counter-clockwise world angle.
pub fn to_world_angle(dial_angle: f64) -> f32 {
    (FRAC_PI_2 - dial_angle) as f32
}

/// Whole-second spacing between labeled ticks, keeping the rim readable
/// as the dial maximum grows.
pub fn tick_step(max_secs: u64) -> u64 {
    const STEPS: [u64; 8] = [1, 2, 5, 10, 15, 30, 60, 300];
    STEPS
        .iter()
        .copied()
        .find(|step| max_secs / step <= 24)
        .unwrap_or(600)
}

/// Dial geometry derived from the window size
#[derive(Debug, Clone, Copy)]
pub struct DialLayout {
    /// Dial center in window coordinates
    pub center: Point2,
    /// Outer face radius
    pub radius: f32,
    /// Inner radius of the segment band ring
    pub band_inner: f32,
    /// Radius of the numeric labels and tick tap targets
    pub label_radius: f32,
    /// Radius of the remaining-time wedge and hand
    pub wedge_radius: f32,
}

impl DialLayout {
    pub fn calculate(window_rect: Rect) -> Self {
        let min_dim = window_rect.w().min(window_rect.h());
        let radius = 0.42 * min_dim;
        Self {
            center: window_rect.xy(),
            radius,
            band_inner: radius * 0.86,
            label_radius: radius * 0.74,
            wedge_radius: radius * 0.64,
        }
    }

    /// Point at a dial angle and radius.
    pub fn point_at(&self, dial_angle: f64, r: f32) -> Point2 {
        let theta = to_world_angle(dial_angle);
        pt2(
            self.center.x + r * theta.cos(),
            self.center.y + r * theta.sin(),
        )
    }

    /// Position of the tick node for a whole-second value.
    pub fn tick_position(&self, seconds: u64, max_secs: u64) -> Point2 {
        let angle = TAU * seconds as f64 / max_secs.max(1) as f64;
        self.point_at(angle, self.label_radius)
    }

    /// Hit test the labeled tick nodes.
    ///
    /// Targets are at least ~40 px across regardless of dial size.
    pub fn hit_test_tick(&self, pos: Point2, max_secs: u64) -> Option<u64> {
        let hit_radius = (0.05 * self.radius).max(20.0);
        let step = tick_step(max_secs);
        let mut seconds = 0;
        while seconds < max_secs {
            let node = self.tick_position(seconds, max_secs);
            let dx = pos.x - node.x;
            let dy = pos.y - node.y;
            if dx * dx + dy * dy <= hit_radius * hit_radius {
                return Some(seconds);
            }
            seconds += step;
        }
        None
    }

    /// Whether a window position lies on the dial face.
    pub fn contains_dial(&self, pos: Point2) -> bool {
        let dx = pos.x - self.center.x;
        let dy = pos.y - self.center.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Pointer position in the dial-local device coordinates the mapper
    /// expects: origin at the center, y-axis pointing down.
    pub fn dial_local(&self, pos: Point2) -> (f64, f64) {
        (
            (pos.x - self.center.x) as f64,
            -(pos.y - self.center.y) as f64,
        )
    }
}

/// Sampled points along a dial arc at a fixed radius.
fn arc_points(layout: &DialLayout, from: f64, to: f64, r: f32) -> Vec<Point2> {
    let samples = (((to - from) * 24.0).ceil() as usize).max(2);
    (0..=samples)
        .map(|i| {
            let angle = from + (to - from) * i as f64 / samples as f64;
            layout.point_at(angle, r)
        })
        .collect()
}

/// Draw the dial face circle.
pub fn draw_face(draw: &Draw, layout: &DialLayout) {
    draw.ellipse()
        .xy(layout.center)
        .radius(layout.radius)
        .color(colors::FACE)
        .stroke(colors::FACE_EDGE)
        .stroke_weight(layout.radius * 0.015);
}

/// Draw the graduated urgency bands around the rim.
pub fn draw_segment_bands(
    draw: &Draw,
    layout: &DialLayout,
    segments: &[Segment],
    mapper: &DialMapper,
) {
    for segment in segments {
        let from = mapper.duration_to_angle(segment.start);
        let to = mapper.duration_to_angle(segment.end);
        if to <= from {
            continue;
        }
        let mut points = arc_points(layout, from, to, layout.radius * 0.985);
        let inner = arc_points(layout, from, to, layout.band_inner);
        points.extend(inner.into_iter().rev());
        draw.polygon()
            .points(points)
            .color(srgb(segment.color.r, segment.color.g, segment.color.b));
    }
}

/// Draw the pie wedge covering the time left, colored by the band the
/// remaining value currently sits in.
pub fn draw_remaining_wedge(
    draw: &Draw,
    layout: &DialLayout,
    snapshot: &TimerSnapshot,
    segments: &[Segment],
    mapper: &DialMapper,
) {
    if snapshot.remaining.is_zero() {
        return;
    }
    let angle = mapper.duration_to_angle(snapshot.remaining);
    let mut points = vec![layout.center];
    points.extend(arc_points(layout, 0.0, angle, layout.wedge_radius));
    match segment_for(segments, snapshot.remaining) {
        Some(segment) => {
            let c = segment.color;
            draw.polygon()
                .points(points)
                .color(srgba(c.r, c.g, c.b, 215u8));
        }
        None => {
            draw.polygon().points(points).color(colors::HAND);
        }
    }
}

/// Draw the whole-second tick marks inside the band ring.
pub fn draw_tick_marks(draw: &Draw, layout: &DialLayout, max_secs: u64) {
    let step = tick_step(max_secs);
    let mut seconds = 0;
    while seconds < max_secs {
        let angle = TAU * seconds as f64 / max_secs as f64;
        let is_major = seconds % (step * 5) == 0;
        let length = if is_major {
            layout.radius * 0.08
        } else {
            layout.radius * 0.045
        };
        let outer = layout.point_at(angle, layout.band_inner);
        let inner = layout.point_at(angle, layout.band_inner - length);
        draw.line()
            .start(inner)
            .end(outer)
            .weight(if is_major { 2.5 } else { 1.5 })
            .color(if is_major {
                colors::TICK_MAJOR
            } else {
                colors::TICK_NORMAL
            });
        seconds += step;
    }
}

/// Draw the numeric labels around the rim, zero at the top.
pub fn draw_labels(draw: &Draw, layout: &DialLayout, max_secs: u64) {
    let step = tick_step(max_secs);
    let font_size = ((layout.radius * 0.055) as u32).max(10);
    let mut seconds = 0;
    while seconds < max_secs {
        let position = layout.tick_position(seconds, max_secs);
        draw.text(&seconds.to_string())
            .xy(position)
            .color(colors::LABEL)
            .font_size(font_size)
            .w(60.0);
        seconds += step;
    }
}

/// Draw the hand pointing at the remaining duration, with its hub.
pub fn draw_hand(draw: &Draw, layout: &DialLayout, dial_angle: f64) {
    let tip = layout.point_at(dial_angle, layout.wedge_radius);
    draw.line()
        .start(layout.center)
        .end(tip)
        .weight(layout.radius * 0.02)
        .color(colors::HAND);
    draw.ellipse()
        .xy(layout.center)
        .radius(layout.radius * 0.045)
        .color(colors::HAND);
}

/// Draw the digital readout and status line under the hub.
pub fn draw_readout(draw: &Draw, layout: &DialLayout, snapshot: &TimerSnapshot) {
    let total = snapshot.remaining.as_secs_f64().round() as u64;
    let readout = format!("{:02}:{:02}", total / 60, total % 60);
    draw.text(&readout)
        .xy(layout.center + vec2(0.0, -layout.radius * 0.30))
        .color(colors::READOUT)
        .font_size(((layout.radius * 0.12) as u32).max(14))
        .w(layout.radius);

    let status = match snapshot.mode {
        Mode::Running => "running",
        Mode::Paused => "paused",
    };
    draw.text(status)
        .xy(layout.center + vec2(0.0, -layout.radius * 0.42))
        .color(colors::STATUS)
        .font_size(((layout.radius * 0.05) as u32).max(10))
        .w(layout.radius);
}

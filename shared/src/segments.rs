//! Segment model - color-banded urgency zones on the dial face
//!
//! The dial face is partitioned into duration ranges that the renderer
//! paints as graduated bands, hottest nearest zero. The table is derived
//! once from the maximum duration and a fixed ratio list and is read-only
//! afterwards; changing the maximum means rebuilding it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DialError;

/// An RGB color, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color-banded duration range on the dial face.
///
/// Spans `[start, end)`; the final band also owns its right endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Duration,
    pub end: Duration,
    pub color: Color,
}

/// Fractions of the maximum duration at which one band ends and the next
/// begins. At a 20-second maximum this yields the 1 s bands near zero and
/// the wide 5 s bands toward the top of the dial.
const BREAKPOINT_RATIOS: [f64; 8] = [0.05, 0.10, 0.15, 0.20, 0.25, 0.50, 0.75, 1.00];

/// Urgency ramp matching [`BREAKPOINT_RATIOS`], red through teal.
const BAND_COLORS: [Color; 8] = [
    Color::new(211, 47, 47),
    Color::new(230, 81, 0),
    Color::new(245, 124, 0),
    Color::new(255, 160, 0),
    Color::new(251, 192, 45),
    Color::new(175, 180, 43),
    Color::new(104, 159, 56),
    Color::new(0, 121, 107),
];

/// Derive the default breakpoint list for a dial with the given maximum.
pub fn default_breakpoints(max_duration: Duration) -> Vec<Duration> {
    BREAKPOINT_RATIOS
        .iter()
        .map(|ratio| Duration::from_secs_f64(max_duration.as_secs_f64() * ratio))
        .collect()
}

/// Build the ordered segment table from parallel breakpoint and color lists.
///
/// The first segment spans `[0, breakpoints[0])`, each subsequent one
/// `[breakpoints[i-1], breakpoints[i])`; ends are clamped to
/// `max_duration`. Fails with [`DialError::ConfigurationMismatch`] when the
/// lists differ in length.
pub fn build_segments(
    breakpoints: &[Duration],
    colors: &[Color],
    max_duration: Duration,
) -> Result<Vec<Segment>, DialError> {
    if breakpoints.len() != colors.len() {
        return Err(DialError::ConfigurationMismatch {
            breakpoints: breakpoints.len(),
            colors: colors.len(),
        });
    }

    let mut segments = Vec::with_capacity(breakpoints.len());
    let mut start = Duration::ZERO;
    for (&breakpoint, &color) in breakpoints.iter().zip(colors) {
        let end = breakpoint.min(max_duration);
        segments.push(Segment { start, end, color });
        start = end;
    }
    Ok(segments)
}

/// The default banding for a dial with the given maximum.
pub fn default_segments(max_duration: Duration) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(BREAKPOINT_RATIOS.len());
    let mut start = Duration::ZERO;
    for (ratio, color) in BREAKPOINT_RATIOS.iter().zip(BAND_COLORS) {
        let end = Duration::from_secs_f64(max_duration.as_secs_f64() * ratio);
        segments.push(Segment { start, end, color });
        start = end;
    }
    segments
}

/// Find the band containing `d`.
///
/// Durations at or beyond the final breakpoint fall in the last band.
pub fn segment_for(segments: &[Segment], d: Duration) -> Option<&Segment> {
    segments.iter().find(|s| d < s.end).or_else(|| segments.last())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_rejected() {
        let breakpoints = [Duration::from_secs(1), Duration::from_secs(2)];
        let colors = [Color::new(255, 0, 0)];
        let err = build_segments(&breakpoints, &colors, Duration::from_secs(2)).unwrap_err();
        assert_eq!(
            err,
            DialError::ConfigurationMismatch {
                breakpoints: 2,
                colors: 1
            }
        );
    }

    #[test]
    fn test_segments_are_contiguous_from_zero() {
        let max = Duration::from_secs(20);
        let segments =
            build_segments(&default_breakpoints(max), &BAND_COLORS, max).unwrap();
        assert_eq!(segments.len(), 8);
        assert_eq!(segments[0].start, Duration::ZERO);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(segments.last().unwrap().end, max);
    }

    #[test]
    fn test_default_table_at_twenty_seconds() {
        let segments = default_segments(Duration::from_secs(20));
        // 1 s bands near zero, 5 s bands toward the maximum.
        assert_eq!(segments[0].end, Duration::from_secs(1));
        assert_eq!(segments[4].end, Duration::from_secs(5));
        assert_eq!(segments[5].end, Duration::from_secs(10));
        assert_eq!(segments[7].end, Duration::from_secs(20));
    }

    #[test]
    fn test_ends_clamp_to_max_duration() {
        let breakpoints = [Duration::from_secs(5), Duration::from_secs(50)];
        let colors = [Color::new(1, 2, 3), Color::new(4, 5, 6)];
        let segments = build_segments(&breakpoints, &colors, Duration::from_secs(10)).unwrap();
        assert_eq!(segments[1].start, Duration::from_secs(5));
        assert_eq!(segments[1].end, Duration::from_secs(10));
    }

    #[test]
    fn test_segment_lookup() {
        let segments = default_segments(Duration::from_secs(20));
        assert_eq!(
            segment_for(&segments, Duration::ZERO).unwrap().color,
            BAND_COLORS[0]
        );
        assert_eq!(
            segment_for(&segments, Duration::from_millis(2500)).unwrap().color,
            BAND_COLORS[2]
        );
        // The right endpoint belongs to the last band.
        assert_eq!(
            segment_for(&segments, Duration::from_secs(20)).unwrap().color,
            BAND_COLORS[7]
        );
        assert!(segment_for(&[], Duration::ZERO).is_none());
    }
}

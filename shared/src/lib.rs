//! Core crate for the countdown dial timer
//!
//! Owns everything that is not pixels or sound: the drift-corrected timer
//! state machine, the dial angle/time geometry, the segment banding table,
//! the drag-gesture adapter, and settings persistence. The app crate layers
//! nannou rendering and the desktop alert on top.

pub mod config;
pub mod dial;
pub mod drag;
pub mod engine;
pub mod segments;

pub use config::{config_path, load_config, save_config, ConfigError, DialConfig};
pub use dial::DialMapper;
pub use drag::DragController;
pub use engine::{Alert, Mode, TimerEngine, TimerSnapshot};
pub use segments::{
    build_segments, default_breakpoints, default_segments, segment_for, Color, Segment,
};

/// Construction-time configuration failures.
///
/// Runtime inputs (pointer positions, requested durations) are clamped or
/// normalized instead; a misconfigured dial simply refuses to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialError {
    /// The dial was configured with a zero maximum duration
    InvalidConfiguration,
    /// Segment breakpoint and color tables differ in length
    ConfigurationMismatch {
        /// Number of breakpoints supplied
        breakpoints: usize,
        /// Number of colors supplied
        colors: usize,
    },
}

impl std::fmt::Display for DialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialError::InvalidConfiguration => {
                write!(f, "maximum duration must be greater than zero")
            }
            DialError::ConfigurationMismatch { breakpoints, colors } => write!(
                f,
                "segment table mismatch: {} breakpoints but {} colors",
                breakpoints, colors
            ),
        }
    }
}

impl std::error::Error for DialError {}

//! Carousel configuration, state snapshots and error definitions

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when driving a carousel
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("A carousel needs at least one slide")]
    NoSlides,

    #[error("Slide index {index} out of range (carousel has {slide_count} slides)")]
    SlideOutOfRange { index: usize, slide_count: usize },

    #[error("Carousel driver has stopped")]
    DriverStopped,
}

/// Timing and gesture constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselConfig {
    /// Period of the automatic advance
    pub advance_interval: Duration,
    /// Grace period after interaction before auto-advance resumes
    pub resume_delay: Duration,
    /// Horizontal travel a drag must exceed to change slides
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            advance_interval: Duration::from_millis(3000),
            resume_delay: Duration::from_millis(3000),
            swipe_threshold_px: 50.0,
        }
    }
}

/// Coarse timer mode of the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The repeating advance timer is live
    AutoAdvancing,
    /// No timer is live; waiting for the user
    Paused,
    /// Interaction ended; a resume timer is pending
    ResumePending,
}

/// What a completed drag did to the active slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Previous,
    Next,
    SnapBack,
}

/// Point-in-time view of a carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub active_index: usize,
    pub slide_count: usize,
    pub mode: Mode,
    pub dragging: bool,
}

/// A drag in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub start_x: f64,
    pub start_index: usize,
}

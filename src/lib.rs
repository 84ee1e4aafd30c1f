//! Buah Ceria - a five-level fruit game for young children
//!
//! Core modules:
//! - `input`: Pointer/touch normalization into surface-local coordinates
//! - `layout`: Responsive target geometry (portrait/landscape/desktop)
//! - `sim`: Per-level interaction state machines, hit-testing and scoring
//! - `levels`: The five concrete level configurations
//! - `audio`: Procedural Web Audio cues
//! - `progress`: Player name and per-level results in LocalStorage

pub mod audio;
pub mod input;
pub mod layout;
pub mod levels;
pub mod progress;
pub mod sim;

pub use progress::GameProgress;
pub use sim::{LevelController, LevelPhase};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Viewports narrower than this are treated as mobile (logical px)
    pub const MOBILE_BREAKPOINT: f32 = 768.0;

    /// How close a press must land to an idle entity to pick it up
    pub const GRAB_RADIUS: f32 = 40.0;

    /// Drop radius around a basket/shadow anchor, per device class
    pub const DROP_RADIUS_DESKTOP: f32 = 80.0;
    pub const DROP_RADIUS_PORTRAIT: f32 = 80.0;
    pub const DROP_RADIUS_LANDSCAPE: f32 = 70.0;
    /// Shadow-matching uses a roomier radius on every device
    pub const DROP_RADIUS_SHADOW: f32 = 100.0;

    /// Distance band around a cut line that still counts as on-line
    pub const TRACE_TOLERANCE: f32 = 30.0;
    /// Accuracy lost per out-of-tolerance sample
    pub const TRACE_ACCURACY_DECAY: f32 = 10.0;
    /// A segment released at or above this progress locks as completed
    pub const TRACE_COMPLETE_AT: f32 = 95.0;

    /// Delay before the result surface appears, letting the completion
    /// cue play out (ms)
    pub const RESULT_DELAY_MS: f64 = 1000.0;
    /// The coloring level uses a slightly snappier delay
    pub const RESULT_DELAY_COLORING_MS: f64 = 800.0;

    /// Number of levels in the campaign
    pub const LEVEL_COUNT: u32 = 5;
}

/// Axis-aligned rectangle in surface-local logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rect anchored at the origin
    pub fn from_size(w: f32, h: f32) -> Self {
        Self::new(0.0, 0.0, w, h)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size.x
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size.y
    }
}

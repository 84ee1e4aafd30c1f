//! Entity and session state shared across the level games

use glam::Vec2;

/// Match-compatibility tag. Sorting matches basket colors, shadow matching
/// matches fruit kinds; the engine only ever compares tags for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category(pub u8);

/// A draggable item (fruit) in a matching-style level
#[derive(Debug, Clone)]
pub struct Draggable {
    pub id: u32,
    pub category: Category,
    /// Surface-local position (follows the pointer while dragging)
    pub pos: Vec2,
    pub dragging: bool,
    /// Placed on its correct target; a resolved entity never drags again
    /// and its position equals its target's position
    pub resolved: bool,
}

impl Draggable {
    pub fn new(id: u32, category: Category, pos: Vec2) -> Self {
        Self {
            id,
            category,
            pos,
            dragging: false,
            resolved: false,
        }
    }
}

/// A drop target (basket or silhouette)
#[derive(Debug, Clone)]
pub struct DropTarget {
    pub id: u32,
    pub category: Category,
    pub pos: Vec2,
    /// Entities locked onto this target
    pub satisfied: Vec<u32>,
}

impl DropTarget {
    pub fn new(id: u32, category: Category, pos: Vec2) -> Self {
        Self {
            id,
            category,
            pos,
            satisfied: Vec::new(),
        }
    }

    #[inline]
    pub fn is_satisfied(&self) -> bool {
        !self.satisfied.is_empty()
    }
}

/// One ordered cut line in the tracing level
#[derive(Debug, Clone)]
pub struct TraceSegment {
    /// Traversal runs from `start` to `end`
    pub start: Vec2,
    pub end: Vec2,
    /// Distance band (logical px) that still counts as on-line
    pub tolerance: f32,
    /// 0-100, monotonically non-decreasing while the segment is active
    pub progress: f32,
    /// 0-100, decays on out-of-tolerance samples, floored at 0
    pub accuracy: f32,
    pub completed: bool,
}

impl TraceSegment {
    pub fn new(start: Vec2, end: Vec2, tolerance: f32) -> Self {
        Self {
            start,
            end,
            tolerance,
            progress: 0.0,
            accuracy: 100.0,
            completed: false,
        }
    }
}

/// Time and mistake bookkeeping for one level attempt.
///
/// The clock starts on the first interaction, not on mount - players who
/// linger on the instructions screen are not penalized. Frozen once the end
/// timestamp is captured.
#[derive(Debug, Clone, Default)]
pub struct SessionMetrics {
    pub mistakes: u32,
    pub started_at: Option<f64>,
    pub ended_at: Option<f64>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the start timestamp on the first interaction only
    pub fn note_interaction(&mut self, now_ms: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
        }
    }

    /// Mistakes accumulate only while the session is live
    pub fn add_mistake(&mut self) {
        if self.ended_at.is_none() {
            self.mistakes += 1;
        }
    }

    /// Freeze the session at completion; later calls are ignored
    pub fn freeze(&mut self, now_ms: f64) {
        if self.ended_at.is_none() {
            self.ended_at = Some(now_ms);
        }
    }

    /// Elapsed duration so far, or the frozen duration once ended
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        match self.started_at {
            Some(start) => self.ended_at.unwrap_or(now_ms) - start,
            None => 0.0,
        }
    }
}

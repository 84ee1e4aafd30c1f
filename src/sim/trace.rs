//! Ordered-segment tracing for the cutting level
//!
//! Segments complete strictly in order; samples are only ever tested
//! against the active segment. Progress along a segment is monotonic -
//! backtracking the finger never regresses it - and accuracy decays on
//! out-of-tolerance samples without touching progress.

use glam::Vec2;

use crate::consts::{TRACE_ACCURACY_DECAY, TRACE_COMPLETE_AT};

use super::state::TraceSegment;

/// Result of feeding one pointer sample to the tracer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    /// Sample ignored (no active stroke, or level already done)
    Ignored,
    /// In-tolerance sample; current progress of the active segment
    Stroke { progress: f32 },
    /// Out-of-tolerance sample or off-line press: a mistake
    OffLine,
    /// Release locked the active segment and advanced to the next
    SegmentCompleted { index: usize },
    /// Release below the completion threshold; segment stays resumable
    Incomplete,
}

/// State for the tracing level
#[derive(Debug, Clone)]
pub struct TraceState {
    pub segments: Vec<TraceSegment>,
    /// Index of the segment currently accepting samples
    pub active: usize,
    drawing: bool,
}

impl TraceState {
    pub fn new(segments: Vec<TraceSegment>) -> Self {
        Self {
            segments,
            active: 0,
            drawing: false,
        }
    }

    fn active_segment(&self) -> Option<&TraceSegment> {
        self.segments.get(self.active).filter(|s| !s.completed)
    }

    /// Perpendicular distance and traversal fraction of `p` against a
    /// segment. Fraction is clamped to [0, 1].
    fn project(seg: &TraceSegment, p: Vec2) -> (f32, f32) {
        let axis = seg.end - seg.start;
        let len_sq = axis.length_squared();
        if len_sq < f32::EPSILON {
            return (p.distance(seg.start), 0.0);
        }
        let t = (p - seg.start).dot(axis) / len_sq;
        let on_axis = seg.start + axis * t;
        (p.distance(on_axis), t.clamp(0.0, 1.0))
    }

    /// Whether `p` is within the segment's tolerance band, including a
    /// small overhang past both endpoints
    fn on_line(seg: &TraceSegment, p: Vec2) -> bool {
        let axis = seg.end - seg.start;
        let len = axis.length();
        if len < f32::EPSILON {
            return p.distance(seg.start) <= seg.tolerance;
        }
        let (dist, _) = Self::project(seg, p);
        let t_raw = (p - seg.start).dot(axis) / (len * len);
        let overhang = seg.tolerance / len;
        dist <= seg.tolerance && t_raw >= -overhang && t_raw <= 1.0 + overhang
    }

    /// Pointer-down. Starting on the active line begins a stroke; starting
    /// off it is a mistake with no stroke.
    pub fn press(&mut self, p: Vec2) -> TraceEvent {
        let Some(seg) = self.active_segment() else {
            return TraceEvent::Ignored;
        };
        if Self::on_line(seg, p) {
            self.drawing = true;
            self.sample(p)
        } else {
            TraceEvent::OffLine
        }
    }

    /// Pointer-move sample during a stroke
    pub fn sample(&mut self, p: Vec2) -> TraceEvent {
        if !self.drawing {
            return TraceEvent::Ignored;
        }
        let idx = self.active;
        let Some(seg) = self.segments.get_mut(idx) else {
            return TraceEvent::Ignored;
        };
        if seg.completed {
            return TraceEvent::Ignored;
        }
        if Self::on_line(seg, p) {
            let (_, t) = Self::project(seg, p);
            // Never regress on backtracking
            seg.progress = seg.progress.max(t * 100.0);
            TraceEvent::Stroke {
                progress: seg.progress,
            }
        } else {
            seg.accuracy = (seg.accuracy - TRACE_ACCURACY_DECAY).max(0.0);
            TraceEvent::OffLine
        }
    }

    /// Pointer-up. A segment traced to the completion threshold locks and
    /// the next one becomes active; otherwise it stays resumable.
    pub fn release(&mut self) -> TraceEvent {
        if !self.drawing {
            return TraceEvent::Ignored;
        }
        self.drawing = false;
        let idx = self.active;
        let Some(seg) = self.segments.get_mut(idx) else {
            return TraceEvent::Ignored;
        };
        if seg.progress >= TRACE_COMPLETE_AT {
            seg.completed = true;
            seg.progress = 100.0;
            if self.active < self.segments.len() {
                self.active += 1;
            }
            TraceEvent::SegmentCompleted { index: idx }
        } else {
            TraceEvent::Incomplete
        }
    }

    /// Move the segment geometry (relayout) without touching progress,
    /// accuracy or completion
    pub fn set_lines(&mut self, lines: &[(Vec2, Vec2)]) {
        debug_assert_eq!(lines.len(), self.segments.len());
        for (seg, (start, end)) in self.segments.iter_mut().zip(lines) {
            seg.start = *start;
            seg.end = *end;
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn all_completed(&self) -> bool {
        !self.segments.is_empty() && self.segments.iter().all(|s| s.completed)
    }

    /// Mean accuracy across all segments, for scoring
    pub fn average_accuracy(&self) -> f32 {
        if self.segments.is_empty() {
            return 0.0;
        }
        self.segments.iter().map(|s| s.accuracy).sum::<f32>() / self.segments.len() as f32
    }
}

//! The five level configurations
//!
//! Each level is a thin file: entity/target manifests, thresholds and
//! geometry tables feeding the shared engine in `sim`. Level numbers are
//! 1-based and fixed.

pub mod coloring;
pub mod cutting;
pub mod drawing;
pub mod shadows;
pub mod sorting;

use crate::Rect;
use crate::layout::LayoutMode;
use crate::sim::LevelController;

/// Build a fresh controller for a level, or `None` for an unknown number
pub fn build(level: u32, mode: LayoutMode, container: Rect) -> Option<LevelController> {
    match level {
        1 => Some(sorting::controller(mode, container)),
        2 => Some(shadows::controller(mode, container)),
        3 => Some(cutting::controller(container)),
        4 => Some(drawing::controller()),
        5 => Some(coloring::controller()),
        _ => None,
    }
}

/// Re-resolve target geometry after a viewport/container change.
///
/// Anchors and radii are replaced wholesale; an in-flight gesture keeps
/// tracking the pointer and only its release sees the new geometry.
pub fn relayout(ctrl: &mut LevelController, mode: LayoutMode, container: Rect) {
    match ctrl.level {
        1 => sorting::relayout(ctrl, mode, container),
        2 => shadows::relayout(ctrl, mode, container),
        3 => cutting::relayout(ctrl, container),
        // Drawing and coloring author their geometry in a fixed viewbox;
        // resizes are absorbed by the input surface transform instead
        _ => {}
    }
}

//! Level 3: trace three vertical cut lines through the apple

use glam::Vec2;

use crate::Rect;
use crate::consts::{RESULT_DELAY_MS, TRACE_TOLERANCE};
use crate::layout::cut_layout;
use crate::sim::{Game, LevelController, StarPolicy, TraceSegment, TraceState};

const POLICY: StarPolicy = StarPolicy::TraceAccuracy {
    three_min_accuracy: 90.0,
    three_max_ms: 8_000.0,
    two_min_accuracy: 70.0,
    two_fallback_max_ms: 15_000.0,
};

fn lines(container: Rect) -> Vec<(Vec2, Vec2)> {
    let layout = cut_layout(container);
    layout
        .line_x
        .iter()
        .map(|&x| {
            (
                Vec2::new(x, layout.frame.origin.y),
                Vec2::new(x, layout.frame.origin.y + layout.frame.height()),
            )
        })
        .collect()
}

pub fn controller(container: Rect) -> LevelController {
    let segments = lines(container)
        .into_iter()
        .map(|(start, end)| TraceSegment::new(start, end, TRACE_TOLERANCE))
        .collect();
    let game = TraceState::new(segments);
    LevelController::new(3, Game::Trace(game), POLICY, RESULT_DELAY_MS)
}

pub fn relayout(ctrl: &mut LevelController, container: Rect) {
    if let Game::Trace(game) = &mut ctrl.game {
        game.set_lines(&lines(container));
    }
}

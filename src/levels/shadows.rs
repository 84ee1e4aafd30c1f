//! Level 2: match fruits to their shadow outlines

use crate::Rect;
use crate::consts::{DROP_RADIUS_SHADOW, RESULT_DELAY_MS};
use crate::layout::{LayoutMode, shadow_layout};
use crate::sim::{
    Category, Draggable, DropGame, DropTarget, Game, LevelController, StarPolicy,
};

pub const PINEAPPLE: Category = Category(0);
pub const WATERMELON: Category = Category(1);
pub const GRAPES: Category = Category(2);
pub const APPLE: Category = Category(3);

/// Fruits in their rest-grid order
pub const FRUITS: [(u32, &str, Category); 4] = [
    (1, "pineapple", PINEAPPLE),
    (2, "watermelon", WATERMELON),
    (3, "grapes", GRAPES),
    (4, "apple", APPLE),
];

/// Shadows in their panel-grid order; deliberately shuffled against the
/// fruit grid so nothing lines up straight across
pub const SHADOWS: [(u32, Category); 4] = [
    (10, APPLE),
    (11, PINEAPPLE),
    (12, GRAPES),
    (13, WATERMELON),
];

const POLICY: StarPolicy = StarPolicy::Mistakes {
    three_max_mistakes: 0,
    three_max_ms: 15_000.0,
    two_max_mistakes: 1,
    two_max_ms: 25_000.0,
};

pub fn controller(mode: LayoutMode, container: Rect) -> LevelController {
    let layout = shadow_layout(mode, container);
    let entities = FRUITS
        .iter()
        .zip(layout.rests)
        .map(|(&(id, _, cat), pos)| Draggable::new(id, cat, pos))
        .collect();
    let targets = SHADOWS
        .iter()
        .zip(layout.shadows)
        .map(|(&(id, cat), pos)| DropTarget::new(id, cat, pos))
        .collect();
    let game = DropGame::new(entities, targets, layout.rests.to_vec(), DROP_RADIUS_SHADOW);
    LevelController::new(2, Game::Drop(game), POLICY, RESULT_DELAY_MS)
}

pub fn relayout(ctrl: &mut LevelController, mode: LayoutMode, container: Rect) {
    if let Game::Drop(game) = &mut ctrl.game {
        let layout = shadow_layout(mode, container);
        game.set_anchors(layout.rests.to_vec(), &layout.shadows);
    }
}

//! Level 1: sort fruits into same-colored baskets

use crate::Rect;
use crate::consts::RESULT_DELAY_MS;
use crate::layout::{LayoutMode, sorting_layout};
use crate::sim::{
    Category, Draggable, DropGame, DropTarget, Game, LevelController, StarPolicy,
};

pub const RED: Category = Category(0);
pub const YELLOW: Category = Category(1);
pub const GREEN: Category = Category(2);

/// Fruits in rest order: apple (red), pear (green), pineapple (yellow)
pub const FRUITS: [(u32, &str, Category); 3] = [
    (1, "apple", RED),
    (2, "pear", GREEN),
    (3, "pineapple", YELLOW),
];

/// Baskets left to right
pub const BASKETS: [(u32, Category); 3] = [(10, RED), (11, YELLOW), (12, GREEN)];

const POLICY: StarPolicy = StarPolicy::Mistakes {
    three_max_mistakes: 0,
    three_max_ms: 10_000.0,
    two_max_mistakes: 1,
    two_max_ms: 20_000.0,
};

pub fn controller(mode: LayoutMode, container: Rect) -> LevelController {
    let layout = sorting_layout(mode, container);
    let entities = FRUITS
        .iter()
        .zip(layout.rests)
        .map(|(&(id, _, cat), pos)| Draggable::new(id, cat, pos))
        .collect();
    let targets = BASKETS
        .iter()
        .zip(layout.baskets)
        .map(|(&(id, cat), pos)| DropTarget::new(id, cat, pos))
        .collect();
    let game = DropGame::new(entities, targets, layout.rests.to_vec(), mode.drop_radius());
    LevelController::new(1, Game::Drop(game), POLICY, RESULT_DELAY_MS)
}

pub fn relayout(ctrl: &mut LevelController, mode: LayoutMode, container: Rect) {
    if let Game::Drop(game) = &mut ctrl.game {
        let layout = sorting_layout(mode, container);
        game.set_anchors(layout.rests.to_vec(), &layout.baskets);
        game.radius = mode.drop_radius();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Cue, DropOutcome, LevelPhase};
    use glam::Vec2;

    fn desktop() -> LevelController {
        controller(LayoutMode::Desktop, Rect::from_size(1024.0, 768.0))
    }

    #[test]
    fn perfect_run_earns_three_stars() {
        let mut ctrl = desktop();
        ctrl.start();
        let layout = sorting_layout(LayoutMode::Desktop, Rect::from_size(1024.0, 768.0));
        // Drag each fruit onto the basket matching its color
        for (i, &(_, _, cat)) in FRUITS.iter().enumerate() {
            let basket = BASKETS.iter().position(|&(_, c)| c == cat).unwrap();
            ctrl.pointer_down(Some(layout.rests[i]), 1000.0 + i as f64);
            ctrl.pointer_move(Some(layout.baskets[basket]), 1001.0 + i as f64);
            ctrl.pointer_up(1002.0 + i as f64);
        }
        assert_eq!(ctrl.phase(), LevelPhase::Completed);
        assert_eq!(ctrl.outcome().unwrap().stars, 3);
    }

    #[test]
    fn wrong_basket_is_a_mistake() {
        let mut ctrl = desktop();
        ctrl.start();
        let layout = sorting_layout(LayoutMode::Desktop, Rect::from_size(1024.0, 768.0));
        // The apple is red; the green basket rejects it
        let green = BASKETS.iter().position(|&(_, c)| c == GREEN).unwrap();
        ctrl.pointer_down(Some(layout.rests[0]), 500.0);
        ctrl.pointer_move(Some(layout.baskets[green]), 510.0);
        ctrl.pointer_up(520.0);
        assert_eq!(ctrl.metrics.mistakes, 1);
        assert!(ctrl.drain_cues().contains(&Cue::Error));
        if let Game::Drop(game) = &ctrl.game {
            assert_eq!(game.entities[0].pos, layout.rests[0]);
        }
    }

    #[test]
    fn drop_radius_follows_layout_mode() {
        let mut ctrl = desktop();
        relayout(
            &mut ctrl,
            LayoutMode::MobileLandscape,
            Rect::from_size(740.0, 360.0),
        );
        if let Game::Drop(game) = &ctrl.game {
            assert_eq!(game.radius, LayoutMode::MobileLandscape.drop_radius());
        }
    }

    #[test]
    fn release_outcome_matches_distance() {
        let layout = sorting_layout(LayoutMode::Desktop, Rect::from_size(1024.0, 768.0));
        let mut ctrl = desktop();
        ctrl.start();
        ctrl.pointer_down(Some(layout.rests[0]), 0.0);
        ctrl.pointer_move(Some(Vec2::new(5.0, 5.0)), 1.0);
        if let Game::Drop(game) = &mut ctrl.game {
            assert_eq!(game.release(), Some(DropOutcome::NoTarget));
        }
    }
}

//! Level 4: free-hand trace over the apple outline

use glam::Vec2;

use crate::consts::RESULT_DELAY_MS;
use crate::input::{SurfaceTransform, TransformOrder};
use crate::sim::{DrawState, Game, LevelController, StarPolicy};

/// The apple outline, three subpaths: body left half, body right half
/// plus stem, and the leaf. Authored in template coordinates.
pub const APPLE_OUTLINE: &str = concat!(
    "M106.454 82.3906 C102.454 67.3906 70.9537 40.3903 27.9538 76.3905 ",
    "C-15.0462 112.391 2.95378 176.891 16.9538 192.891 ",
    "C30.9537 208.891 45.9538 221.176 62.4537 225.891 ",
    "C83.4537 231.891 90.4538 230.391 106.954 222.391 ",
    "M106.954 222.391 C118.454 231.391 150.454 231.885 169.954 216.891 ",
    "C189.454 201.896 197.25 197.02 205.954 177.891 ",
    "C212.324 163.891 224.954 112.891 185.954 75.8906 ",
    "C146.954 38.8905 112.454 74.8906 112.454 74.8906 ",
    "C112.454 74.8906 108.954 61.3906 112.954 45.8906 ",
    "C116.954 30.3906 127.454 22.8906 127.454 22.8906 ",
    "C127.454 22.8906 126.954 13.3908 120.454 18.8906 ",
    "C113.954 24.3904 109.954 27.3906 104.954 44.3906 ",
    "C100.761 58.6472 106.954 82.3906 106.954 82.3906 ",
    "M102.954 40.3909 C102.954 40.3909 103.454 20.988 82.9537 7.89087 ",
    "C62.4537 -5.20624 39.9537 4.39062 39.9537 4.39062 ",
    "C39.9537 4.39062 42.4537 12.3908 47.9537 20.3907 ",
    "C53.4537 28.3906 54.6469 29.1405 60.9537 33.3907 ",
    "C83.9537 48.8906 103.954 46.8909 103.954 46.8909",
);

const POLICY: StarPolicy = StarPolicy::Coverage {
    three_min_coverage: 90.0,
    three_window_ms: (15_000.0, 20_000.0),
    two_min_coverage: 70.0,
    two_max_ms: 30_000.0,
};

/// The outline group is rendered as `scale(1.5) translate(100 40)`;
/// invert the same transform to bring pointer samples into template space.
pub fn surface_transform() -> SurfaceTransform {
    SurfaceTransform::new(
        1.5,
        Vec2::new(100.0, 40.0),
        TransformOrder::ScaleThenTranslate,
    )
}

pub fn controller() -> LevelController {
    let game = DrawState::new(APPLE_OUTLINE);
    LevelController::new(4, Game::Draw(game), POLICY, RESULT_DELAY_MS)
}

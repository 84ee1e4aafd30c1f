//! Level 5: color the watermelon by tapping its facets

use glam::Vec2;

use crate::Rect;
use crate::consts::RESULT_DELAY_COLORING_MS;
use crate::input::{SurfaceTransform, TransformOrder};
use crate::layout::fit_viewbox;
use crate::sim::{Boundary, ColoringState, FillRegion, Game, LevelController, StarPolicy};

/// Design viewbox the watermelon facets are authored in
pub const VIEWBOX: Vec2 = Vec2::new(400.0, 260.0);

/// Palette offered to the player; the first entry is preselected
pub const PALETTE: [&str; 3] = ["#e53935", "#43a047", "#8d6e63"];

/// Facet polygons in paint order, bottom to top. Tapping picks the topmost
/// facet under the pointer, so the leaves win over the body where they
/// overlap.
const FACETS: [&[(f32, f32)]; 6] = [
    // body
    &[
        (200.0, 40.0),
        (260.0, 70.0),
        (320.0, 120.0),
        (300.0, 200.0),
        (200.0, 220.0),
        (100.0, 200.0),
        (80.0, 120.0),
        (140.0, 70.0),
    ],
    // top wedge
    &[(140.0, 70.0), (200.0, 120.0), (260.0, 70.0)],
    // right cheek
    &[(200.0, 120.0), (200.0, 220.0), (300.0, 200.0), (320.0, 120.0)],
    // left cheek
    &[(200.0, 120.0), (200.0, 220.0), (100.0, 200.0), (80.0, 120.0)],
    // left leaf
    &[(120.0, 30.0), (140.0, 70.0), (200.0, 40.0), (180.0, 20.0)],
    // right leaf
    &[(280.0, 30.0), (260.0, 70.0), (200.0, 40.0), (220.0, 20.0)],
];

fn regions() -> Vec<FillRegion> {
    FACETS
        .iter()
        .enumerate()
        .map(|(i, pts)| {
            let verts = pts.iter().map(|&(x, y)| Vec2::new(x, y)).collect();
            FillRegion::new(i as u32 + 1, Boundary::Polygon(verts))
        })
        .collect()
}

/// Contain-fit of the viewbox into the canvas; invert it to bring pointer
/// samples into viewbox coordinates.
pub fn surface_transform(container: Rect) -> SurfaceTransform {
    let (scale, offset) = fit_viewbox(VIEWBOX, container);
    SurfaceTransform::new(scale, offset, TransformOrder::TranslateThenScale)
}

pub fn controller() -> LevelController {
    let game = ColoringState::new(regions(), PALETTE[0]);
    LevelController::new(
        5,
        Game::Color(game),
        StarPolicy::Fixed(3),
        RESULT_DELAY_COLORING_MS,
    )
}

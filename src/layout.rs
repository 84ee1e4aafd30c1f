//! Responsive target geometry
//!
//! Anchors for every drop target, rest position, cut line and canvas frame
//! are recomputed from the live container rect - proportions with minimum
//! clamps, never bare pixel constants. The resolver is pure; the wasm entry
//! point re-runs it on mount (one frame deferred), window resize,
//! orientation change and container resize, and hit-testing consumes the
//! result synchronously.

use glam::Vec2;

use crate::Rect;
use crate::consts::*;

/// Coarse device/orientation class driving anchor placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    MobilePortrait,
    MobileLandscape,
    Desktop,
}

impl LayoutMode {
    /// Classify the current viewport (logical px)
    pub fn classify(viewport_w: f32, viewport_h: f32) -> Self {
        let mobile = viewport_w < MOBILE_BREAKPOINT;
        let portrait = viewport_h > viewport_w;
        match (mobile, portrait) {
            (true, true) => LayoutMode::MobilePortrait,
            (true, false) => LayoutMode::MobileLandscape,
            (false, _) => LayoutMode::Desktop,
        }
    }

    /// Drop radius for basket-style targets on this device class
    pub fn drop_radius(&self) -> f32 {
        match self {
            LayoutMode::MobilePortrait => DROP_RADIUS_PORTRAIT,
            LayoutMode::MobileLandscape => DROP_RADIUS_LANDSCAPE,
            LayoutMode::Desktop => DROP_RADIUS_DESKTOP,
        }
    }
}

/// Anchors for the fruit-sorting level: three fruits in a top row, three
/// baskets in a bottom row
#[derive(Debug, Clone, PartialEq)]
pub struct SortingLayout {
    pub rests: [Vec2; 3],
    pub baskets: [Vec2; 3],
}

/// Lay out the sorting level inside `container`
pub fn sorting_layout(mode: LayoutMode, container: Rect) -> SortingLayout {
    let w = container.width();
    let h = container.height();

    let (rest_xs, rest_y, basket_xs, basket_y) = match mode {
        LayoutMode::MobilePortrait => {
            // Stack vertically around the horizontal center
            let cx = w / 2.0;
            let top = (h * 0.15).max(100.0);
            let bottom = (h - 120.0).max(h * 0.65);
            let xs = [cx - 80.0, cx, cx + 80.0];
            (xs, top, xs, bottom)
        }
        LayoutMode::MobileLandscape => {
            // Limited height: pull both rows toward the vertical middle
            let spacing = ((w - 100.0) / 3.0).min(100.0);
            let start = ((w - spacing * 2.0) / 2.0).max(50.0);
            let xs = [start, start + spacing, start + spacing * 2.0];
            let top = (h * 0.15).max(40.0);
            let bottom = (h - 80.0).max(h * 0.6);
            (xs, top, xs, bottom)
        }
        LayoutMode::Desktop => {
            let spacing = (w / 5.0).min(150.0);
            let start = ((w - spacing * 2.0) / 2.0).max(150.0);
            let xs = [start, start + spacing, start + spacing * 2.0];
            let top = (h * 0.25).max(120.0);
            let bottom = (h - 150.0).max(h * 0.65);
            (xs, top, xs, bottom)
        }
    };

    SortingLayout {
        rests: [
            Vec2::new(rest_xs[0], rest_y),
            Vec2::new(rest_xs[1], rest_y),
            Vec2::new(rest_xs[2], rest_y),
        ],
        baskets: [
            Vec2::new(basket_xs[0], basket_y),
            Vec2::new(basket_xs[1], basket_y),
            Vec2::new(basket_xs[2], basket_y),
        ],
    }
}

/// Anchors for the shadow-matching level: a 2x2 fruit panel and a 2x2
/// silhouette panel. Index order matches the level's entity/target lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLayout {
    pub rests: [Vec2; 4],
    pub shadows: [Vec2; 4],
}

/// Lay out the shadow-matching level inside `container`.
///
/// Portrait stacks the panels (fruits on top, silhouettes below); landscape
/// and desktop put them side by side around the container center.
pub fn shadow_layout(mode: LayoutMode, container: Rect) -> ShadowLayout {
    let w = container.width();
    let h = container.height();

    // Silhouettes keep a fixed 2x2 grid inside their panel
    let shadow_grid = [
        Vec2::new(80.0, 80.0),
        Vec2::new(200.0, 80.0),
        Vec2::new(80.0, 200.0),
        Vec2::new(200.0, 200.0),
    ];

    let (rest_origin, rest_step, shadow_origin) = match mode {
        LayoutMode::MobilePortrait => {
            let top_panel = Vec2::new(w / 2.0 - 140.0, 60.0);
            let shadow_panel = Vec2::new(w / 2.0 - 140.0, 320.0);
            (top_panel, (60.0, 180.0), shadow_panel)
        }
        LayoutMode::MobileLandscape => {
            let (pw, ph) = (280.0, 300.0);
            let left_panel = Vec2::new(w / 2.0 - 24.0 - pw, h / 2.0 - ph / 2.0);
            let shadow_panel = Vec2::new(w / 2.0 + 24.0, h / 2.0 - 192.0);
            (left_panel, (60.0, 180.0), shadow_panel)
        }
        LayoutMode::Desktop => {
            let (pw, ph) = (320.0, 384.0);
            let left_panel = Vec2::new(w / 2.0 - 24.0 - pw, h / 2.0 - ph / 2.0);
            let shadow_panel = Vec2::new(w / 2.0 + 24.0, h / 2.0 - 192.0);
            (left_panel, (80.0, 200.0), shadow_panel)
        }
    };

    let (near, far) = rest_step;
    let rests = [
        rest_origin + Vec2::new(near, near),
        rest_origin + Vec2::new(far, near),
        rest_origin + Vec2::new(near, far),
        rest_origin + Vec2::new(far, far),
    ];
    let shadows = [
        shadow_origin + shadow_grid[0],
        shadow_origin + shadow_grid[1],
        shadow_origin + shadow_grid[2],
        shadow_origin + shadow_grid[3],
    ];

    ShadowLayout { rests, shadows }
}

/// Frame and line abscissas for the apple-cutting level
#[derive(Debug, Clone, PartialEq)]
pub struct CutLayout {
    /// Apple artwork frame, centered in the container
    pub frame: Rect,
    /// X positions of the three vertical cut lines, left to right
    pub line_x: [f32; 3],
}

/// Fractions of the apple frame width where the cut lines sit
pub const CUT_LINE_FRACTIONS: [f32; 3] = [0.3, 0.5, 0.7];

/// Lay out the cutting level: the apple frame fills 55% of the smaller
/// container dimension, lines at 30/50/70% of its width
pub fn cut_layout(container: Rect) -> CutLayout {
    let side = container.width().min(container.height()) * 0.55;
    let frame = Rect::new(
        container.origin.x + (container.width() - side) / 2.0,
        container.origin.y + (container.height() - side) / 2.0,
        side,
        side,
    );
    let line_x = [
        frame.origin.x + frame.width() * CUT_LINE_FRACTIONS[0],
        frame.origin.x + frame.width() * CUT_LINE_FRACTIONS[1],
        frame.origin.x + frame.width() * CUT_LINE_FRACTIONS[2],
    ];
    CutLayout { frame, line_x }
}

/// Uniform contain-fit of a fixed design viewbox into a container.
///
/// Returns `(scale, offset)` such that `offset + p * scale` maps viewbox
/// coordinates to container coordinates. The coloring and drawing levels
/// author their geometry in a fixed viewbox and scale it through this.
pub fn fit_viewbox(view: Vec2, container: Rect) -> (f32, Vec2) {
    let scale = (container.width() / view.x).min(container.height() / view.y);
    let fitted = view * scale;
    let offset = container.origin + (container.size - fitted) * 0.5;
    (scale, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_modes() {
        assert_eq!(
            LayoutMode::classify(390.0, 844.0),
            LayoutMode::MobilePortrait
        );
        assert_eq!(
            LayoutMode::classify(740.0, 360.0),
            LayoutMode::MobileLandscape
        );
        assert_eq!(LayoutMode::classify(1280.0, 800.0), LayoutMode::Desktop);
        // Exactly at the breakpoint counts as desktop
        assert_eq!(LayoutMode::classify(768.0, 1024.0), LayoutMode::Desktop);
    }

    #[test]
    fn drop_radius_per_device() {
        assert_eq!(LayoutMode::Desktop.drop_radius(), 80.0);
        assert_eq!(LayoutMode::MobilePortrait.drop_radius(), 80.0);
        assert_eq!(LayoutMode::MobileLandscape.drop_radius(), 70.0);
    }

    #[test]
    fn sorting_baskets_sit_below_fruits() {
        for mode in [
            LayoutMode::MobilePortrait,
            LayoutMode::MobileLandscape,
            LayoutMode::Desktop,
        ] {
            let l = sorting_layout(mode, Rect::from_size(1000.0, 700.0));
            for i in 0..3 {
                assert!(l.baskets[i].y > l.rests[i].y, "{mode:?}");
                // Columns line up so a straight drag down lands in radius
                assert_eq!(l.baskets[i].x, l.rests[i].x, "{mode:?}");
            }
        }
    }

    #[test]
    fn sorting_scales_with_container() {
        let small = sorting_layout(LayoutMode::Desktop, Rect::from_size(1000.0, 700.0));
        let large = sorting_layout(LayoutMode::Desktop, Rect::from_size(2000.0, 1400.0));
        assert_ne!(small.baskets, large.baskets);
        // Rows track the container height proportionally
        assert!(large.baskets[0].y > small.baskets[0].y);
    }

    #[test]
    fn shadow_panels_are_disjoint() {
        for mode in [
            LayoutMode::MobilePortrait,
            LayoutMode::MobileLandscape,
            LayoutMode::Desktop,
        ] {
            let l = shadow_layout(mode, Rect::from_size(900.0, 900.0));
            for rest in &l.rests {
                for shadow in &l.shadows {
                    assert!(
                        rest.distance(*shadow) > 1.0,
                        "{mode:?}: rest {rest} overlaps shadow {shadow}"
                    );
                }
            }
        }
    }

    #[test]
    fn cut_lines_stay_inside_frame_and_scale() {
        let l = cut_layout(Rect::from_size(800.0, 600.0));
        for x in l.line_x {
            assert!(x > l.frame.origin.x && x < l.frame.origin.x + l.frame.width());
        }
        let bigger = cut_layout(Rect::from_size(1600.0, 1200.0));
        assert!(bigger.frame.width() > l.frame.width());
        assert!(bigger.line_x[1] > l.line_x[1]);
    }

    #[test]
    fn viewbox_fit_is_contained_and_centered() {
        let (scale, offset) = fit_viewbox(Vec2::new(400.0, 260.0), Rect::from_size(800.0, 800.0));
        assert_eq!(scale, 2.0);
        // 400x260 at scale 2 is 800x520, centered vertically
        assert_eq!(offset, Vec2::new(0.0, 140.0));
    }
}

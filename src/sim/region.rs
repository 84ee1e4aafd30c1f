//! Region fill for the coloring level
//!
//! Click/tap-to-fill over closed regions. Point-in-polygon is the standard
//! even-odd ray cast; simple frames use a rect fast path. There is no
//! mistake concept here - any region may take any color any number of
//! times, and the level ends only on the player's explicit finish.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;

/// Closed boundary of a fillable region
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    /// Arbitrary closed polygon (vertices in order, implicitly closed)
    Polygon(Vec<Vec2>),
    /// Axis-aligned box
    Rect(Rect),
}

impl Boundary {
    /// Even-odd containment test
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Boundary::Rect(r) => r.contains(p),
            Boundary::Polygon(verts) => {
                if verts.len() < 3 {
                    return false;
                }
                // Ray cast toward +x, toggling parity per crossed edge
                let mut inside = false;
                let mut j = verts.len() - 1;
                for i in 0..verts.len() {
                    let (a, b) = (verts[i], verts[j]);
                    if (a.y > p.y) != (b.y > p.y) {
                        let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                        if p.x < x_cross {
                            inside = !inside;
                        }
                    }
                    j = i;
                }
                inside
            }
        }
    }
}

/// Active coloring tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pencil,
    Eraser,
}

/// One fillable region of the artwork
#[derive(Debug, Clone)]
pub struct FillRegion {
    pub id: u32,
    pub boundary: Boundary,
    /// Current fill, `None` = empty/transparent
    pub fill: Option<String>,
}

impl FillRegion {
    pub fn new(id: u32, boundary: Boundary) -> Self {
        Self {
            id,
            boundary,
            fill: None,
        }
    }
}

/// Serializable snapshot of the artwork (region id -> color)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artwork(pub BTreeMap<u32, String>);

/// State for the coloring level
#[derive(Debug, Clone)]
pub struct ColoringState {
    /// Regions in paint order; later regions sit on top and win hit-tests
    pub regions: Vec<FillRegion>,
    pub tool: Tool,
    pub color: String,
}

impl ColoringState {
    pub fn new(regions: Vec<FillRegion>, initial_color: &str) -> Self {
        Self {
            regions,
            tool: Tool::Pencil,
            color: initial_color.to_owned(),
        }
    }

    /// Apply the active tool at a point. Topmost hit region wins. Returns
    /// the id of the region that changed, if any.
    pub fn apply(&mut self, p: Vec2) -> Option<u32> {
        let region = self
            .regions
            .iter_mut()
            .rev()
            .find(|r| r.boundary.contains(p))?;
        match self.tool {
            Tool::Pencil => region.fill = Some(self.color.clone()),
            Tool::Eraser => region.fill = None,
        }
        Some(region.id)
    }

    /// Snapshot the current fills for export/persistence
    pub fn artwork(&self) -> Artwork {
        Artwork(
            self.regions
                .iter()
                .filter_map(|r| r.fill.clone().map(|c| (r.id, c)))
                .collect(),
        )
    }

    pub fn clear(&mut self) {
        for r in &mut self.regions {
            r.fill = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: u32, x: f32, y: f32, side: f32) -> FillRegion {
        FillRegion::new(
            id,
            Boundary::Polygon(vec![
                Vec2::new(x, y),
                Vec2::new(x + side, y),
                Vec2::new(x + side, y + side),
                Vec2::new(x, y + side),
            ]),
        )
    }

    #[test]
    fn even_odd_handles_concave_polygons() {
        // An L-shape: the notch is outside
        let l_shape = Boundary::Polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 50.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(50.0, 100.0),
            Vec2::new(0.0, 100.0),
        ]);
        assert!(l_shape.contains(Vec2::new(25.0, 75.0)));
        assert!(l_shape.contains(Vec2::new(75.0, 25.0)));
        assert!(!l_shape.contains(Vec2::new(75.0, 75.0)));
        assert!(!l_shape.contains(Vec2::new(150.0, 25.0)));
    }

    #[test]
    fn rect_fast_path() {
        let b = Boundary::Rect(Rect::new(10.0, 10.0, 30.0, 20.0));
        assert!(b.contains(Vec2::new(25.0, 15.0)));
        assert!(!b.contains(Vec2::new(5.0, 15.0)));
    }

    #[test]
    fn degenerate_polygon_never_hits() {
        let b = Boundary::Polygon(vec![Vec2::ZERO, Vec2::new(10.0, 10.0)]);
        assert!(!b.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn fill_erase_refill_keeps_last_color() {
        let mut state = ColoringState::new(vec![square(1, 0.0, 0.0, 100.0)], "#e53935");
        let p = Vec2::new(50.0, 50.0);

        assert_eq!(state.apply(p), Some(1));
        assert_eq!(state.regions[0].fill.as_deref(), Some("#e53935"));

        state.tool = Tool::Eraser;
        assert_eq!(state.apply(p), Some(1));
        assert_eq!(state.regions[0].fill, None);

        state.tool = Tool::Pencil;
        state.color = "#43a047".to_owned();
        assert_eq!(state.apply(p), Some(1));
        assert_eq!(state.regions[0].fill.as_deref(), Some("#43a047"));

        let art = state.artwork();
        assert_eq!(art.0.get(&1).map(String::as_str), Some("#43a047"));
    }

    #[test]
    fn topmost_region_wins_overlap() {
        let mut state = ColoringState::new(
            vec![square(1, 0.0, 0.0, 100.0), square(2, 50.0, 50.0, 100.0)],
            "#8d6e63",
        );
        // Point inside both: region 2 is painted on top
        assert_eq!(state.apply(Vec2::new(75.0, 75.0)), Some(2));
        // Point only in region 1
        assert_eq!(state.apply(Vec2::new(25.0, 25.0)), Some(1));
    }

    #[test]
    fn miss_changes_nothing() {
        let mut state = ColoringState::new(vec![square(1, 0.0, 0.0, 100.0)], "#e53935");
        assert_eq!(state.apply(Vec2::new(500.0, 500.0)), None);
        assert!(state.artwork().0.is_empty());
    }
}

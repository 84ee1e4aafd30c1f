//! Pointer/touch input normalization
//!
//! Mouse, single-touch and unified pointer events all funnel into one
//! surface-local `(x, y)`. Levels never see raw DOM events.
//!
//! The tricky part: a surface may declare a zoom/pan transform (the drawing
//! level's canvas group does). Hit-testing runs in the surface's
//! *untransformed* logical units, so normalization must invert that exact
//! transform in its declared composition order. Getting the order wrong
//! silently breaks every hit-test, which is why the inversion is pure code
//! tested without a DOM.

use glam::Vec2;

use crate::Rect;

/// How a surface's scale and translate compose.
///
/// Matches how the transform is declared, not how it reads aloud:
/// `ScaleThenTranslate` is an SVG `transform="scale(s) translate(t)"` list,
/// which maps a logical point `p` to `s * (p + t)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOrder {
    /// `device = scale * (local + translate)`
    ScaleThenTranslate,
    /// `device = scale * local + translate`
    TranslateThenScale,
}

/// A declared zoom/pan transform on an interaction surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    pub scale: f32,
    pub translate: Vec2,
    pub order: TransformOrder,
}

impl SurfaceTransform {
    pub fn new(scale: f32, translate: Vec2, order: TransformOrder) -> Self {
        Self {
            scale,
            translate,
            order,
        }
    }

    /// Map a logical point into the surface's rendered (device) space
    pub fn apply(&self, local: Vec2) -> Vec2 {
        match self.order {
            TransformOrder::ScaleThenTranslate => (local + self.translate) * self.scale,
            TransformOrder::TranslateThenScale => local * self.scale + self.translate,
        }
    }

    /// Map a rendered point back into logical units (exact inverse of `apply`)
    pub fn invert(&self, device: Vec2) -> Vec2 {
        match self.order {
            TransformOrder::ScaleThenTranslate => device / self.scale - self.translate,
            TransformOrder::TranslateThenScale => (device - self.translate) / self.scale,
        }
    }
}

/// An interaction surface: its live client-space bounding rect plus any
/// declared transform. Rebuilt from the DOM on every event, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Bounding rect in client (viewport) coordinates
    pub rect: Rect,
    pub transform: Option<SurfaceTransform>,
}

impl Surface {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            transform: None,
        }
    }

    pub fn with_transform(rect: Rect, transform: SurfaceTransform) -> Self {
        Self {
            rect,
            transform: Some(transform),
        }
    }

    /// Client coordinates -> surface-local logical coordinates
    pub fn to_local(&self, client: Vec2) -> Vec2 {
        let device = client - self.rect.origin;
        match &self.transform {
            Some(t) => t.invert(device),
            None => device,
        }
    }
}

/// Normalize a client-space point against a possibly-unattached surface.
///
/// `None` means the surface element is not mounted yet; callers must no-op
/// rather than hit-test against (0, 0).
pub fn normalize(surface: Option<&Surface>, client: Vec2) -> Option<Vec2> {
    surface.map(|s| s.to_local(client))
}

/// DOM event extraction (wasm only). Multi-touch is unsupported: only the
/// first active touch point is read, later concurrent touches are ignored.
#[cfg(target_arch = "wasm32")]
pub mod dom {
    use glam::Vec2;
    use web_sys::{Element, MouseEvent, PointerEvent, TouchEvent};

    use super::Surface;
    use crate::Rect;

    /// Build a `Surface` from an element's current bounding rect
    pub fn surface_from_element(el: &Element) -> Surface {
        let r = el.get_bounding_client_rect();
        Surface::new(Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }

    /// Client coordinates of a mouse event
    pub fn client_point_mouse(ev: &MouseEvent) -> Vec2 {
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
    }

    /// Client coordinates of a pointer event
    pub fn client_point_pointer(ev: &PointerEvent) -> Vec2 {
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
    }

    /// Client coordinates of the first active touch, if any
    pub fn client_point_touch(ev: &TouchEvent) -> Option<Vec2> {
        ev.touches()
            .get(0)
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
    }

    /// touchend reports the lifted finger in `changed_touches`
    pub fn client_point_touch_end(ev: &TouchEvent) -> Option<Vec2> {
        ev.changed_touches()
            .get(0)
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn plain_surface_subtracts_origin() {
        let s = Surface::new(Rect::new(40.0, 80.0, 800.0, 600.0));
        let p = s.to_local(Vec2::new(140.0, 180.0));
        assert!(close(p, Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn unattached_surface_yields_none() {
        assert_eq!(normalize(None, Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn drawing_canvas_transform_inverts_like_the_svg_group() {
        // The drawing level's group declares scale(1.5) translate(100, 40).
        // A logical point p renders at 1.5 * (p + t), so the inverse is
        // device / 1.5 - t.
        let t = SurfaceTransform::new(
            1.5,
            Vec2::new(100.0, 40.0),
            TransformOrder::ScaleThenTranslate,
        );
        let device = t.apply(Vec2::new(50.0, 60.0));
        assert!(close(device, Vec2::new(225.0, 150.0)));
        assert!(close(t.invert(device), Vec2::new(50.0, 60.0)));
    }

    #[test]
    fn composition_orders_are_not_interchangeable() {
        let tr = Vec2::new(100.0, 40.0);
        let a = SurfaceTransform::new(1.5, tr, TransformOrder::ScaleThenTranslate);
        let b = SurfaceTransform::new(1.5, tr, TransformOrder::TranslateThenScale);
        let p = Vec2::new(50.0, 60.0);
        // Inverting with the wrong order lands somewhere else entirely
        assert!(!close(b.invert(a.apply(p)), p));
        assert!(!close(a.invert(b.apply(p)), p));
    }

    #[test]
    fn surface_with_transform_round_trips_through_client_space() {
        let rect = Rect::new(12.0, 34.0, 400.0, 260.0);
        let t = SurfaceTransform::new(
            2.0,
            Vec2::new(-30.0, 15.0),
            TransformOrder::TranslateThenScale,
        );
        let s = Surface::with_transform(rect, t);
        let local = Vec2::new(123.0, 45.0);
        let client = t.apply(local) + rect.origin;
        assert!(close(s.to_local(client), local));
    }

    proptest! {
        #[test]
        fn inversion_round_trip(
            scale in 0.05f32..20.0,
            tx in -2000.0f32..2000.0,
            ty in -2000.0f32..2000.0,
            px in -5000.0f32..5000.0,
            py in -5000.0f32..5000.0,
            scale_first in proptest::bool::ANY,
        ) {
            let order = if scale_first {
                TransformOrder::ScaleThenTranslate
            } else {
                TransformOrder::TranslateThenScale
            };
            let t = SurfaceTransform::new(scale, Vec2::new(tx, ty), order);
            let p = Vec2::new(px, py);
            let back = t.invert(t.apply(p));
            // Tolerance scales with magnitude (f32 round-trip)
            let tol = 1e-2 * (1.0 + p.length() + tx.abs() + ty.abs());
            prop_assert!((back - p).length() <= tol);
        }
    }
}

#![forbid(unsafe_code)]

//! Cut-out shapes for highlighted targets.
//!
//! The shape only affects how a highlight is punched out of the mask.
//! Placement math always works on the bounding rectangle.

use serde::{Deserialize, Serialize};

use crate::geometry::{Offset, Rect};

/// How a highlight rectangle is rendered as a cut-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightShape {
    /// Circle centered in the rectangle with radius `min(w, h) / 2`.
    Circle,
    /// The rectangle itself with rounded corners.
    #[default]
    RoundedRect,
    /// Ellipse inscribed in the rectangle.
    Oval,
}

impl HighlightShape {
    /// Whether `point` falls inside the cut-out drawn for `bounds`.
    ///
    /// `corner_radius` only applies to [`HighlightShape::RoundedRect`] and is
    /// clamped to half the shorter side.
    pub fn covers(self, bounds: &Rect, corner_radius: f32, point: Offset) -> bool {
        if bounds.is_empty() {
            return false;
        }
        match self {
            HighlightShape::Circle => {
                let c = bounds.center();
                let r = bounds.width.min(bounds.height) / 2.0;
                let dx = point.x - c.x;
                let dy = point.y - c.y;
                dx * dx + dy * dy <= r * r
            }
            HighlightShape::Oval => {
                let c = bounds.center();
                let rx = bounds.width / 2.0;
                let ry = bounds.height / 2.0;
                let nx = (point.x - c.x) / rx;
                let ny = (point.y - c.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            HighlightShape::RoundedRect => {
                if !bounds.contains(point) {
                    return false;
                }
                let r = corner_radius
                    .max(0.0)
                    .min(bounds.width / 2.0)
                    .min(bounds.height / 2.0);
                if r <= 0.0 {
                    return true;
                }
                // Only the four corner squares can reject a contained point.
                let cx = point.x.clamp(bounds.left() + r, bounds.right() - r);
                let cy = point.y.clamp(bounds.top() + r, bounds.bottom() - r);
                let dx = point.x - cx;
                let dy = point.y - cy;
                dx * dx + dy * dy <= r * r
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn default_shape_is_rounded_rect() {
        assert_eq!(HighlightShape::default(), HighlightShape::RoundedRect);
    }

    #[test]
    fn circle_excludes_corners() {
        let r = square();
        assert!(HighlightShape::Circle.covers(&r, 0.0, Offset::new(50.0, 50.0)));
        assert!(!HighlightShape::Circle.covers(&r, 0.0, Offset::new(2.0, 2.0)));
    }

    #[test]
    fn circle_uses_shorter_side() {
        let wide = Rect::new(0.0, 0.0, 200.0, 50.0);
        // Center at (100, 25), radius 25.
        assert!(HighlightShape::Circle.covers(&wide, 0.0, Offset::new(120.0, 25.0)));
        assert!(!HighlightShape::Circle.covers(&wide, 0.0, Offset::new(130.0, 25.0)));
    }

    #[test]
    fn oval_fills_wide_rect() {
        let wide = Rect::new(0.0, 0.0, 200.0, 50.0);
        assert!(HighlightShape::Oval.covers(&wide, 0.0, Offset::new(190.0, 25.0)));
        assert!(!HighlightShape::Oval.covers(&wide, 0.0, Offset::new(195.0, 5.0)));
    }

    #[test]
    fn rounded_rect_trims_only_corners() {
        let r = square();
        let shape = HighlightShape::RoundedRect;
        assert!(shape.covers(&r, 12.0, Offset::new(50.0, 1.0)));
        assert!(shape.covers(&r, 12.0, Offset::new(1.0, 50.0)));
        assert!(!shape.covers(&r, 12.0, Offset::new(0.5, 0.5)));
        assert!(shape.covers(&r, 0.0, Offset::new(0.5, 0.5)));
    }

    #[test]
    fn empty_bounds_cover_nothing() {
        let r = Rect::new(10.0, 10.0, 0.0, 10.0);
        for shape in [
            HighlightShape::Circle,
            HighlightShape::RoundedRect,
            HighlightShape::Oval,
        ] {
            assert!(!shape.covers(&r, 4.0, Offset::new(10.0, 15.0)));
        }
    }
}

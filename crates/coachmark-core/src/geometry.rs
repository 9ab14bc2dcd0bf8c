#![forbid(unsafe_code)]

//! Geometric primitives in viewport pixels.
//!
//! All coordinates are `f32` with the origin at the top-left of the viewport
//! and `y` growing downward. Rectangles are axis-aligned and never carry a
//! negative extent: constructors clamp `width` and `height` at zero.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Default inset used by [`Anchor::place`], in pixels.
pub const DEFAULT_ANCHOR_INSET: f32 = 16.0;

/// A 2D point or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// The unmeasured size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size, clamping negative extents to zero.
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Whether both extents are strictly positive.
    ///
    /// A viewport that has not been laid out yet reports `false`.
    #[inline]
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle.
///
/// Invariant: `width >= 0 && height >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle; negative extents are clamped to zero.
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub fn from_origin_size(origin: Offset, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a rectangle from its four edges.
    #[inline]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// A rectangle covering the whole viewport.
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Geometric center.
    #[inline]
    pub fn center(&self) -> Offset {
        Offset::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment test (`left <= x < right`, `top <= y < bottom`).
    #[inline]
    pub fn contains(&self, point: Offset) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Grow the rectangle by `amount` on every side.
    ///
    /// A negative amount shrinks it; the extent never drops below zero.
    #[must_use]
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Move the rectangle by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Offset) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_ltrb(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Overlapping region, or `None` if the rectangles only touch or are apart.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom).then(|| Rect::from_ltrb(left, top, right, bottom))
    }

    /// Whether the two rectangles share any area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }
}

/// One of nine fixed positions inside the viewport.
///
/// Used to register targets whose bounds are not reported by a laid-out
/// element (e.g. a floating button drawn by a foreign view system).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// All anchors in reading order.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Place a rectangle of `size` at this anchor, `inset` pixels from the
    /// viewport edges it touches. Centered axes ignore the inset.
    pub fn place_with_inset(self, size: Size, viewport: Size, inset: f32) -> Rect {
        let start = inset;
        let center_x = (viewport.width - size.width) / 2.0;
        let center_y = (viewport.height - size.height) / 2.0;
        let end_x = viewport.width - size.width - inset;
        let end_y = viewport.height - size.height - inset;

        let (x, y) = match self {
            Anchor::TopLeft => (start, start),
            Anchor::TopCenter => (center_x, start),
            Anchor::TopRight => (end_x, start),
            Anchor::CenterLeft => (start, center_y),
            Anchor::Center => (center_x, center_y),
            Anchor::CenterRight => (end_x, center_y),
            Anchor::BottomLeft => (start, end_y),
            Anchor::BottomCenter => (center_x, end_y),
            Anchor::BottomRight => (end_x, end_y),
        };
        Rect::new(x, y, size.width, size.height)
    }

    /// [`place_with_inset`](Self::place_with_inset) with the default 16 px inset.
    pub fn place(self, size: Size, viewport: Size) -> Rect {
        self.place_with_inset(size, viewport, DEFAULT_ANCHOR_INSET)
    }
}

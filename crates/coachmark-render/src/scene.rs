#![forbid(unsafe_code)]

//! One composed overlay frame.
//!
//! An [`OverlayFrame`] is plain data: the dim mask color, the cut-outs
//! punched into it, and the card with its control hit regions. Painting
//! backends (the ASCII raster in this crate, or a host's own canvas) consume
//! it; the host routes taps through [`OverlayFrame::hit_test`].

use coachmark_core::{HighlightShape, Offset, PackedRgba, Rect, Size};
use coachmark_layout::PlacementSide;

use crate::card::{CardControl, CardLayout};

/// A transparent hole in the mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutout {
    /// Padded highlight rectangle.
    pub rect: Rect,
    pub shape: HighlightShape,
    pub corner_radius: f32,
}

impl Cutout {
    pub fn contains(&self, point: Offset) -> bool {
        self.shape.covers(&self.rect, self.corner_radius, point)
    }
}

/// The tooltip card as placed in the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFrame {
    pub rect: Rect,
    pub layout: CardLayout,
    pub side: PlacementSide,
    pub background: PackedRgba,
    pub text_color: PackedRgba,
    pub elevation: f32,
    pub corner_radius: f32,
}

impl CardFrame {
    /// The control under `point` (viewport coordinates).
    pub fn control_at(&self, point: Offset) -> Option<CardControl> {
        if !self.rect.contains(point) {
            return None;
        }
        self.layout.control_at(point - self.rect.origin())
    }

    /// A control's hit region in viewport coordinates.
    pub fn control_rect(&self, control: CardControl) -> Option<Rect> {
        self.layout
            .region(control)
            .map(|region| region.rect.translate(self.rect.origin()))
    }
}

/// What lies under a point of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Mask,
    Cutout,
    Card,
}

/// Everything needed to paint one overlay frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub viewport: Size,
    /// Mask color after fading.
    pub mask_color: PackedRgba,
    pub cutouts: Vec<Cutout>,
    pub card: CardFrame,
    /// 0-based step index.
    pub step_index: usize,
    pub step_count: usize,
    /// Card height the placement was solved with.
    pub solved_card_height: f32,
    /// The card measured differently from `solved_card_height`; the
    /// renderer has recorded the new height and the next frame re-solves.
    pub needs_relayout: bool,
}

impl OverlayFrame {
    /// The overlay consumes every pointer event while it is shown.
    pub fn blocks_input(&self) -> bool {
        true
    }

    /// The card control under `point`, if any. Taps elsewhere are swallowed.
    pub fn hit_test(&self, point: Offset) -> Option<CardControl> {
        self.card.control_at(point)
    }

    /// The topmost layer at `point`.
    pub fn layer_at(&self, point: Offset) -> Layer {
        if self.card.rect.contains(point) {
            Layer::Card
        } else if self.cutouts.iter().any(|c| c.contains(point)) {
            Layer::Cutout
        } else {
            Layer::Mask
        }
    }

    /// Whether the host content at `point` is dimmed.
    pub fn is_dimmed(&self, point: Offset) -> bool {
        self.layer_at(point) == Layer::Mask && self.mask_color.a() > 0
    }

    /// This frame with the mask faded by `alpha`.
    #[must_use]
    pub fn faded(mut self, alpha: f32) -> Self {
        self.mask_color = self.mask_color.fade(alpha);
        self
    }
}

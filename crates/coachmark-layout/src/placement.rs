#![forbid(unsafe_code)]

//! Tooltip card placement.
//!
//! [`solve_card_position`] is a pure function of the highlight rectangles,
//! the viewport, the card size and a [`PlacementConfig`]. The card height is
//! usually a guess on the first frame ([`PlacementConfig::fallback_card_height`])
//! and the measured value afterwards, so callers re-invoke the solver whenever
//! the measurement changes.
//!
//! # Algorithm
//!
//! 1. Unmeasured viewport or no highlights: top-left margin corner.
//! 2. Two or more highlights: sort by top edge and look for an interior gap
//!    of at least `card_height + spacing` between consecutive rectangles.
//!    The card goes `spacing / 2` below the upper rectangle of the first
//!    such gap. The margin clamp applies only as far as the card stays
//!    inside the gap.
//! 3. Otherwise treat the union of all highlights as one block:
//!    - block center in the lower half and room above: place above;
//!    - block center in the upper half and room below: place below;
//!    - else the side with more room, ties going above.
//! 4. Horizontally the card is centered, never left of the margin.
//!    Vertically it is clamped into `[margin, H - margin - h]` when the
//!    viewport is tall enough, else into `[0, H - h]`.

use coachmark_core::{Offset, Rect, Size};
use serde::{Deserialize, Serialize};
use tracing::{debug_span, trace};

/// Solver tunables, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementConfig {
    /// Distance between the card and the highlight it avoids.
    pub spacing: f32,
    /// Minimum distance between the card and the viewport edges.
    pub margin: f32,
    /// Card height assumed before the first measurement.
    pub fallback_card_height: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            spacing: 32.0,
            margin: 64.0,
            fallback_card_height: 250.0,
        }
    }
}

impl PlacementConfig {
    #[must_use]
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    #[must_use]
    pub fn fallback_card_height(mut self, height: f32) -> Self {
        self.fallback_card_height = height.max(0.0);
        self
    }

    /// `measured` when it is a usable height, the fallback otherwise.
    pub fn card_height_or_fallback(&self, measured: Option<f32>) -> f32 {
        match measured {
            Some(h) if h.is_finite() && h > 0.0 => h,
            _ => self.fallback_card_height,
        }
    }
}

/// Which rule produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementSide {
    /// Above the topmost highlight.
    Above,
    /// Below the bottommost highlight.
    Below,
    /// Between two highlights; `after` is the index (in top-edge order) of
    /// the rectangle the card sits below.
    Gap { after: usize },
    /// Nothing to avoid yet.
    Fallback,
}

/// A solved card position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPlacement {
    /// Top-left corner of the card.
    pub offset: Offset,
    pub side: PlacementSide,
}

impl CardPlacement {
    /// The card's rectangle for a card of `size`.
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.offset, size)
    }
}

/// Solve the card's top-left offset.
///
/// `highlights` are already padded. `card` carries the fixed card width and
/// the current (possibly fallback) height.
pub fn solve_card_position(
    highlights: &[Rect],
    viewport: Size,
    card: Size,
    config: &PlacementConfig,
) -> CardPlacement {
    let _span = debug_span!(
        "coachmark.solve",
        targets = highlights.len(),
        viewport_w = viewport.width,
        viewport_h = viewport.height,
        card_h = card.height
    )
    .entered();

    let margin = config.margin;
    if !viewport.is_measured() || highlights.is_empty() {
        trace!("degenerate input, using margin corner");
        return CardPlacement {
            offset: Offset::new(margin, margin),
            side: PlacementSide::Fallback,
        };
    }

    let w = viewport.width;
    let h = viewport.height;
    let card_h = card.height;
    let spacing = config.spacing;
    let x = margin.max((w - card.width) / 2.0);

    let mut sorted = highlights.to_vec();
    sorted.sort_by(|a, b| a.top().total_cmp(&b.top()));

    if let Some((after, y)) = find_gap(&sorted, h, card_h, config) {
        trace!(after, y, "placed in gap");
        return CardPlacement {
            offset: Offset::new(x, y),
            side: PlacementSide::Gap { after },
        };
    }

    let top = sorted.iter().map(Rect::top).fold(f32::INFINITY, f32::min);
    let bottom = sorted
        .iter()
        .map(Rect::bottom)
        .fold(f32::NEG_INFINITY, f32::max);
    let center = (top + bottom) / 2.0;
    let needed = card_h + spacing;
    let room_above = top - margin;
    let room_below = h - bottom - margin;
    let lower_half = center >= h / 2.0;

    let (y, side) = if lower_half && room_above >= needed {
        (top - spacing - card_h, PlacementSide::Above)
    } else if !lower_half && room_below >= needed {
        (bottom + spacing, PlacementSide::Below)
    } else if room_above >= room_below {
        (margin.max(top - card_h - spacing), PlacementSide::Above)
    } else {
        ((bottom + spacing).min(h - card_h - margin), PlacementSide::Below)
    };

    let y = clamp_y(y, h, card_h, margin);
    trace!(?side, x, y, "placed beside union");
    CardPlacement {
        offset: Offset::new(x, y),
        side,
    }
}

fn find_gap(sorted: &[Rect], h: f32, card_h: f32, config: &PlacementConfig) -> Option<(usize, f32)> {
    let needed = card_h + config.spacing;
    sorted.windows(2).enumerate().find_map(|(i, pair)| {
        let (upper, lower) = (pair[0].bottom(), pair[1].top());
        if lower - upper < needed {
            return None;
        }
        let y = clamp_y(upper + config.spacing / 2.0, h, card_h, config.margin);
        // Never leave the gap, even if that means crossing a margin.
        Some((i, y.min(lower - card_h).max(upper)))
    })
}

fn clamp_y(y: f32, h: f32, card_h: f32, margin: f32) -> f32 {
    if h >= card_h + 2.0 * margin {
        y.clamp(margin, h - margin - card_h)
    } else if h >= card_h {
        y.clamp(0.0, h - card_h)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_W: f32 = 280.0;

    fn solve(rects: &[Rect], w: f32, h: f32, card_h: f32) -> CardPlacement {
        solve_card_position(
            rects,
            Size::new(w, h),
            Size::new(CARD_W, card_h),
            &PlacementConfig::default(),
        )
    }

    // ── Degenerate input ─────────────────────────────────────────────────

    #[test]
    fn unmeasured_viewport_uses_margin_corner() {
        let p = solve(&[Rect::new(0.0, 0.0, 10.0, 10.0)], 0.0, 800.0, 100.0);
        assert_eq!(p.offset, Offset::new(64.0, 64.0));
        assert_eq!(p.side, PlacementSide::Fallback);
    }

    #[test]
    fn no_targets_uses_margin_corner() {
        let p = solve(&[], 400.0, 800.0, 100.0);
        assert_eq!(p.offset, Offset::new(64.0, 64.0));
        assert_eq!(p.side, PlacementSide::Fallback);
    }

    // ── Single target ────────────────────────────────────────────────────

    #[test]
    fn lower_target_places_above() {
        let target = Rect::new(0.0, 600.0, 400.0, 100.0);
        let p = solve(&[target], 400.0, 800.0, 200.0);
        assert_eq!(p.side, PlacementSide::Above);
        assert_eq!(p.offset.y, 600.0 - 32.0 - 200.0);
        assert_eq!(p.offset.x, 64.0);
    }

    #[test]
    fn upper_target_places_below() {
        let target = Rect::new(16.0, 100.0, 368.0, 80.0);
        let p = solve(&[target], 400.0, 800.0, 200.0);
        assert_eq!(p.side, PlacementSide::Below);
        assert_eq!(p.offset.y, 180.0 + 32.0);
    }

    #[test]
    fn card_is_centered_when_viewport_is_wide() {
        let target = Rect::new(0.0, 100.0, 50.0, 50.0);
        let p = solve(&[target], 1000.0, 800.0, 200.0);
        assert_eq!(p.offset.x, (1000.0 - CARD_W) / 2.0);
    }

    #[test]
    fn cramped_lower_target_picks_roomier_side_and_clamps() {
        // Tall target in the lower half with too little room above or below.
        let target = Rect::new(0.0, 200.0, 400.0, 520.0);
        let p = solve(&[target], 400.0, 800.0, 200.0);
        // room above 136, below 16: above wins, clamped to the margin.
        assert_eq!(p.side, PlacementSide::Above);
        assert_eq!(p.offset.y, 64.0);
    }

    #[test]
    fn equal_room_goes_above() {
        // Centered block, no side big enough, identical room (186 each).
        let target = Rect::new(0.0, 250.0, 400.0, 300.0);
        let p = solve(&[target], 400.0, 800.0, 300.0);
        assert_eq!(p.side, PlacementSide::Above);
        assert_eq!(p.offset.y, 64.0);
    }

    // ── Multiple targets ─────────────────────────────────────────────────

    #[test]
    fn gap_between_targets_is_reused() {
        let rects = [
            Rect::new(0.0, 400.0, 400.0, 100.0),
            Rect::new(0.0, 0.0, 400.0, 100.0),
        ];
        let p = solve(&rects, 400.0, 600.0, 150.0);
        assert_eq!(p.side, PlacementSide::Gap { after: 0 });
        assert_eq!(p.offset.y, 116.0);
        assert!(p.offset.y >= 100.0 && p.offset.y + 150.0 <= 400.0);
    }

    #[test]
    fn gap_near_top_edge_is_still_used() {
        // Upper target ends above the margin; the card must not slide onto
        // the lower target.
        let rects = [
            Rect::from_ltrb(0.0, 0.0, 400.0, 40.0),
            Rect::from_ltrb(0.0, 300.0, 400.0, 560.0),
        ];
        let p = solve(&rects, 400.0, 600.0, 150.0);
        assert_eq!(p.side, PlacementSide::Gap { after: 0 });
        assert_eq!(p.offset.y, 64.0);
        assert!(p.offset.y + 150.0 <= 300.0);
    }

    #[test]
    fn tight_gap_beats_margin() {
        // The gap exactly fits the card; the margin clamp would push it into
        // the lower target, so the gap bound wins.
        let rects = [
            Rect::from_ltrb(0.0, 0.0, 400.0, 10.0),
            Rect::from_ltrb(0.0, 192.0, 400.0, 400.0),
        ];
        let p = solve(&rects, 400.0, 600.0, 150.0);
        assert_eq!(p.side, PlacementSide::Gap { after: 0 });
        assert_eq!(p.offset.y, 42.0);
    }

    #[test]
    fn narrow_gap_falls_back_to_union() {
        let rects = [
            Rect::new(0.0, 500.0, 400.0, 60.0),
            Rect::new(0.0, 600.0, 400.0, 60.0),
        ];
        let p = solve(&rects, 400.0, 800.0, 200.0);
        assert_eq!(p.side, PlacementSide::Above);
        assert_eq!(p.offset.y, 500.0 - 32.0 - 200.0);
    }

    #[test]
    fn composite_bottom_target_places_above_both() {
        // Bottom bar plus a floating button overlapping its top edge.
        let bar = Rect::new(0.0, 740.0, 400.0, 60.0);
        let fab = Rect::new(172.0, 700.0, 56.0, 56.0);
        let p = solve(&[bar, fab], 400.0, 800.0, 200.0);
        assert_eq!(p.side, PlacementSide::Above);
        assert_eq!(p.offset.y, 700.0 - 32.0 - 200.0);
    }

    // ── Height feedback ──────────────────────────────────────────────────

    #[test]
    fn measured_height_replaces_fallback() {
        let config = PlacementConfig::default();
        assert_eq!(config.card_height_or_fallback(None), 250.0);
        assert_eq!(config.card_height_or_fallback(Some(0.0)), 250.0);
        assert_eq!(config.card_height_or_fallback(Some(f32::NAN)), 250.0);
        assert_eq!(config.card_height_or_fallback(Some(180.0)), 180.0);
    }

    #[test]
    fn resolving_with_measured_height_moves_card() {
        let target = Rect::new(0.0, 600.0, 400.0, 100.0);
        let first = solve(&[target], 400.0, 800.0, 250.0);
        let second = solve(&[target], 400.0, 800.0, 150.0);
        assert_eq!(first.offset.y + 250.0, second.offset.y + 150.0);
    }

    #[test]
    fn solver_is_pure() {
        let rects = [Rect::new(10.0, 300.0, 100.0, 40.0)];
        let a = solve(&rects, 400.0, 800.0, 120.0);
        let b = solve(&rects, 400.0, 800.0, 120.0);
        assert_eq!(a, b);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: PlacementConfig = serde_json::from_str(r#"{"margin": 24}"#).unwrap();
        assert_eq!(config.margin, 24.0);
        assert_eq!(config.spacing, 32.0);
        assert_eq!(config.fallback_card_height, 250.0);
    }
}

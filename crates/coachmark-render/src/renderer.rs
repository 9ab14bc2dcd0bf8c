#![forbid(unsafe_code)]

//! Overlay composition with card-height feedback.
//!
//! The card's height is only known once it has been laid out, but the card's
//! position depends on that height. [`OverlayRenderer::render`] therefore
//! solves with the last measured height (or the fallback before the first
//! measurement), measures the card it just placed, and records the new
//! height when it differs. Such a frame is flagged `needs_relayout` and the
//! next call re-solves with the measured height. [`OverlayRenderer::settle`]
//! repeats until the height is stable.

use std::fmt;

use coachmark_core::{Rect, Size, Step, WalkthroughConfig};
use coachmark_layout::{PlacementCache, PlacementConfig};
use coachmark_runtime::WalkthroughSnapshot;
use tracing::{debug, debug_span, trace};

use crate::card::{CardContent, CardHook, CardLayout, CardMetrics};
use crate::scene::{CardFrame, Cutout, OverlayFrame};

/// Upper bound on render passes in [`OverlayRenderer::settle`].
const MAX_SETTLE_PASSES: usize = 4;

/// Builds [`OverlayFrame`]s from walkthrough snapshots.
pub struct OverlayRenderer {
    config: WalkthroughConfig,
    placement: PlacementConfig,
    metrics: CardMetrics,
    card_hook: Option<CardHook>,
    measured_card_height: Option<f32>,
    cache: PlacementCache,
}

impl fmt::Debug for OverlayRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayRenderer")
            .field("config", &self.config)
            .field("placement", &self.placement)
            .field("metrics", &self.metrics)
            .field("card_hook", &self.card_hook.is_some())
            .field("measured_card_height", &self.measured_card_height)
            .finish_non_exhaustive()
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(WalkthroughConfig::default())
    }
}

impl OverlayRenderer {
    pub fn new(config: WalkthroughConfig) -> Self {
        Self {
            config,
            placement: PlacementConfig::default(),
            metrics: CardMetrics::default(),
            card_hook: None,
            measured_card_height: None,
            cache: PlacementCache::default(),
        }
    }

    #[must_use]
    pub fn placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self.cache.clear();
        self
    }

    #[must_use]
    pub fn metrics(mut self, metrics: CardMetrics) -> Self {
        self.metrics = metrics;
        self.measured_card_height = None;
        self
    }

    /// Replace the built-in card content.
    #[must_use]
    pub fn card_hook(
        mut self,
        hook: impl Fn(&Step, usize, usize) -> CardContent + 'static,
    ) -> Self {
        self.card_hook = Some(Box::new(hook));
        self.measured_card_height = None;
        self
    }

    pub fn config(&self) -> &WalkthroughConfig {
        &self.config
    }

    pub fn placement_config(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Last measured card height, if any frame has been measured.
    pub fn measured_card_height(&self) -> Option<f32> {
        self.measured_card_height
    }

    /// Forget the measured height; the next frame uses the fallback again.
    pub fn reset_measurement(&mut self) {
        self.measured_card_height = None;
    }

    /// Compose one frame, or `None` when nothing should be drawn.
    ///
    /// A step whose target never registered still gets a full mask and a
    /// card at the solver's fallback corner, so navigation stays reachable.
    pub fn render(&mut self, snapshot: &WalkthroughSnapshot, viewport: Size) -> Option<OverlayFrame> {
        let step = match (&snapshot.step, snapshot.visible) {
            (Some(step), true) => step,
            _ => return None,
        };
        let _span = debug_span!(
            "coachmark.overlay.frame",
            step = snapshot.index,
            key = %step.target_key,
            viewport_w = viewport.width,
            viewport_h = viewport.height
        )
        .entered();

        let padding = self.config.highlight_padding;
        let highlights = snapshot.registry.highlights(&step.target_key, padding);
        if highlights.is_empty() {
            debug!(key = %step.target_key, "no target registered, drawing plain mask");
        }
        let rects: Vec<Rect> = highlights.iter().map(|(rect, _)| *rect).collect();

        let card_width = self.metrics.card_width(self.config.card_max_width, viewport);
        let solved_height = self
            .placement
            .card_height_or_fallback(self.measured_card_height);
        let placement = self.cache.solve(
            &rects,
            viewport,
            Size::new(card_width, solved_height),
            &self.placement,
        );

        let current = snapshot.step_number();
        let total = snapshot.step_count;
        let content = match &self.card_hook {
            Some(hook) => hook(step, current, total),
            None => CardContent::for_step(step, current, total, &self.config),
        };
        let layout = CardLayout::measure(&content, card_width, &self.metrics);
        let measured = layout.size.height;
        let needs_relayout = measured != solved_height;
        if needs_relayout {
            debug!(from = solved_height, to = measured, "card height measured");
            self.measured_card_height = Some(measured);
        }

        let cutouts = highlights
            .into_iter()
            .map(|(rect, shape)| Cutout {
                rect,
                shape,
                corner_radius: self.config.highlight_corner_radius,
            })
            .collect::<Vec<_>>();
        trace!(
            cutouts = cutouts.len(),
            side = ?placement.side,
            x = placement.offset.x,
            y = placement.offset.y,
            "overlay composed"
        );

        Some(OverlayFrame {
            viewport,
            mask_color: self.config.overlay_color,
            cutouts,
            card: CardFrame {
                rect: placement.rect(layout.size),
                layout,
                side: placement.side,
                background: self.config.card_background_color,
                text_color: self.config.card_text_color,
                elevation: self.config.card_elevation,
                corner_radius: self.metrics.corner_radius,
            },
            step_index: snapshot.index,
            step_count: total,
            solved_card_height: solved_height,
            needs_relayout,
        })
    }

    /// Render until the card height feeds back without change.
    pub fn settle(&mut self, snapshot: &WalkthroughSnapshot, viewport: Size) -> Option<OverlayFrame> {
        let mut frame = self.render(snapshot, viewport)?;
        for _ in 1..MAX_SETTLE_PASSES {
            if !frame.needs_relayout {
                break;
            }
            frame = self.render(snapshot, viewport)?;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachmark_core::{HighlightShape, Offset};
    use coachmark_layout::PlacementSide;
    use coachmark_runtime::WalkthroughState;

    fn state() -> WalkthroughState {
        WalkthroughState::new(
            vec![
                Step::new("a", "Profile", "Tap to open your profile.", "profile"),
                Step::new("b", "Balance", "Your balance.", "balance"),
            ],
            false,
        )
    }

    const VIEWPORT: Size = Size {
        width: 400.0,
        height: 800.0,
    };

    #[test]
    fn hidden_state_renders_nothing() {
        let mut renderer = OverlayRenderer::default();
        assert!(renderer.render(&state().snapshot(), VIEWPORT).is_none());
    }

    #[test]
    fn first_frame_uses_fallback_then_resolves() {
        let mut s = state();
        s.start();
        s.registry()
            .register("profile", Rect::new(16.0, 600.0, 48.0, 48.0), HighlightShape::Circle);
        let mut renderer = OverlayRenderer::default();

        let first = renderer.render(&s.snapshot(), VIEWPORT).unwrap();
        assert_eq!(first.solved_card_height, 250.0);
        assert!(first.needs_relayout);
        let measured = renderer.measured_card_height().unwrap();
        assert_ne!(measured, 250.0);

        let second = renderer.render(&s.snapshot(), VIEWPORT).unwrap();
        assert_eq!(second.solved_card_height, measured);
        assert!(!second.needs_relayout);
        assert_eq!(second.card.side, PlacementSide::Above);
        assert_eq!(second.card.rect.bottom(), 600.0 - 32.0);
    }

    #[test]
    fn settle_converges() {
        let mut s = state();
        s.start();
        s.registry()
            .register("profile", Rect::new(16.0, 80.0, 48.0, 48.0), HighlightShape::Circle);
        let mut renderer = OverlayRenderer::default();
        let frame = renderer.settle(&s.snapshot(), VIEWPORT).unwrap();
        assert!(!frame.needs_relayout);
        assert_eq!(frame.card.side, PlacementSide::Below);
        assert_eq!(frame.card.rect.top(), 128.0 + 32.0);
        assert_eq!(frame.cutouts.len(), 1);
    }

    #[test]
    fn missing_target_draws_mask_and_corner_card() {
        let mut s = state();
        s.start();
        let mut renderer = OverlayRenderer::default();
        let frame = renderer.settle(&s.snapshot(), VIEWPORT).unwrap();
        assert!(frame.cutouts.is_empty());
        assert_eq!(frame.card.side, PlacementSide::Fallback);
        assert_eq!(frame.card.rect.origin(), Offset::new(64.0, 64.0));
    }

    #[test]
    fn padding_inflates_cutouts() {
        let mut s = state();
        s.start();
        s.registry()
            .register("profile", Rect::new(100.0, 100.0, 50.0, 50.0), HighlightShape::RoundedRect);
        let mut renderer = OverlayRenderer::new(WalkthroughConfig::default().highlight_padding(8.0));
        let frame = renderer.settle(&s.snapshot(), VIEWPORT).unwrap();
        assert_eq!(frame.cutouts[0].rect, Rect::new(92.0, 92.0, 66.0, 66.0));
        assert_eq!(frame.cutouts[0].corner_radius, 12.0);
    }

    #[test]
    fn custom_card_hook_replaces_content() {
        let mut s = state();
        s.start();
        s.next();
        let mut renderer = OverlayRenderer::default().card_hook(|step, current, total| {
            CardContent::new(format!("{} #{current}", step.title), format!("of {total}"))
        });
        let frame = renderer.settle(&s.snapshot(), VIEWPORT).unwrap();
        assert_eq!(frame.card.layout.heading_lines, vec!["Balance #2"]);
        assert_eq!(frame.card.layout.body_lines, vec!["of 2"]);
        // Only the always-present dismiss control.
        assert_eq!(frame.card.layout.controls.len(), 1);
    }
}

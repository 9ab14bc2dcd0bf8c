#![forbid(unsafe_code)]

//! Coachmark public facade.
//!
//! A coachmark walkthrough dims the host screen, punches shape-accurate
//! holes around the UI elements a step is about, and shows a tooltip card
//! that walks the user through them one step at a time.
//!
//! The pieces, in data-flow order:
//!
//! 1. The host lays out its screen and reports element bounds through a
//!    [`LayoutPass`], which commits them to the [`TargetRegistry`] as one
//!    snapshot.
//! 2. [`WalkthroughState`] moves through the [`StepList`] and emits
//!    [`WalkthroughEvent`]s.
//! 3. [`OverlayRenderer`] reads a [`WalkthroughSnapshot`], asks the placement
//!    solver where the card goes, measures the card, and returns an
//!    [`OverlayFrame`] for the host to paint and hit-test.
//!
//! ```
//! use coachmark::prelude::*;
//!
//! let mut state = WalkthroughState::new(
//!     vec![Step::new("intro", "Balance", "Your balance lives here.", "balance")],
//!     false,
//! );
//! let mut pass = LayoutPass::full(state.registry());
//! pass.report("balance", Rect::new(16.0, 120.0, 368.0, 140.0), HighlightShape::RoundedRect);
//! pass.commit();
//!
//! state.start();
//! let mut renderer = OverlayRenderer::default();
//! let frame = renderer.settle(&state.snapshot(), Size::new(400.0, 800.0)).unwrap();
//! assert_eq!(frame.cutouts.len(), 1);
//! ```

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use coachmark_core::{
    Anchor, ConfigError, HighlightShape, Offset, PackedRgba, Rect, Size, Step, StepList,
    StepSourceError, StepSourceOrigin, WalkthroughConfig, load_or_fallback, load_steps,
    parse_or_fallback, parse_steps,
};

// --- Runtime re-exports ----------------------------------------------------

pub use coachmark_runtime::{
    EventHub, FinishReason, LayoutPass, NavAction, PassMode, RegistrySnapshot, Subscription,
    TargetList, TargetPosition, TargetRegistry, WalkthroughEvent, WalkthroughSnapshot,
    WalkthroughState,
};

// --- Layout re-exports -----------------------------------------------------

pub use coachmark_layout::{
    CardPlacement, PlacementCache, PlacementConfig, PlacementSide, solve_card_position,
};

// --- Render re-exports -----------------------------------------------------

pub use coachmark_render::{
    CardContent, CardControl, CardFrame, CardLayout, CardMetrics, Cutout, FadeEasing, FadePhase,
    Layer, MaskRaster, OverlayFade, OverlayFrame, OverlayRenderer,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CardContent, CardControl, Error, HighlightShape, LayoutPass, OverlayFrame,
        OverlayRenderer, Rect, Result, Size, Step, StepList, WalkthroughConfig,
        WalkthroughEvent, WalkthroughState,
    };

    pub use crate::{core, layout, render, runtime};
}

pub use coachmark_core as core;
pub use coachmark_layout as layout;
pub use coachmark_render as render;
pub use coachmark_runtime as runtime;

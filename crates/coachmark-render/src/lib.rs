#![forbid(unsafe_code)]

//! Overlay rendering for coachmark walkthroughs.
//!
//! [`OverlayRenderer`] turns a [`WalkthroughSnapshot`](coachmark_runtime::WalkthroughSnapshot)
//! and a viewport into an [`OverlayFrame`]: a dimmed mask with shape-accurate
//! cut-outs at the current step's highlights, plus a measured tooltip card at
//! the solved position. Hosts paint the frame however they like; [`MaskRaster`]
//! paints it as ASCII.
//!
//! The card's measured height feeds back into placement, so the first frame
//! for a new card may be flagged `needs_relayout`. Call
//! [`OverlayRenderer::settle`] to get a frame whose placement already uses
//! the measured height.

pub mod card;
pub mod fade;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod text;

pub use card::{CardContent, CardControl, CardHook, CardLayout, CardMetrics, ControlRegion};
pub use fade::{FadeEasing, FadePhase, OverlayFade};
pub use raster::MaskRaster;
pub use renderer::OverlayRenderer;
pub use scene::{CardFrame, Cutout, Layer, OverlayFrame};

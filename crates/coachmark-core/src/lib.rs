#![forbid(unsafe_code)]

//! Core value types for coachmark walkthrough overlays.
//!
//! This crate holds everything the rest of the workspace agrees on:
//!
//! - [`geometry`]: viewport-space [`Offset`], [`Size`], [`Rect`], and the
//!   nine-point [`Anchor`] used to place synthetic targets.
//! - [`shape`]: the [`HighlightShape`] tag and its cut-out coverage test.
//! - [`color`]: packed RGBA colors with source-over blending.
//! - [`step`]: the immutable [`Step`] descriptor and the declarative step
//!   source loader with its fallback path.
//! - [`config`]: [`WalkthroughConfig`], the display/behavior options.
//!
//! Nothing here holds mutable state; the runtime crate owns that.

pub mod color;
pub mod config;
pub mod geometry;
pub mod shape;
pub mod step;

pub use color::PackedRgba;
pub use config::{ConfigError, WalkthroughConfig};
pub use geometry::{Anchor, Offset, Rect, Size};
pub use shape::HighlightShape;
pub use step::{
    Step, StepList, StepSourceError, StepSourceOrigin, load_or_fallback, load_steps,
    parse_or_fallback, parse_steps,
};

#![forbid(unsafe_code)]

//! Card placement for coachmark overlays.
//!
//! The solver is a pure function: it reads highlight rectangles, the
//! viewport and the card size, and returns where the card's top-left corner
//! goes. It never touches the registry or the walkthrough state, so the
//! renderer can call it as often as the card's measured height changes.

pub mod cache;
pub mod placement;

pub use cache::{PlacementCache, PlacementCacheStats, PlacementKey};
pub use placement::{CardPlacement, PlacementConfig, PlacementSide, solve_card_position};

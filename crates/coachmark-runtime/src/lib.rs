#![forbid(unsafe_code)]

//! Walkthrough runtime: the live half of a coachmark session.
//!
//! - [`registry`]: copy-on-write map from target keys to screen rectangles.
//!   Every write publishes a new immutable [`RegistrySnapshot`]; readers keep
//!   whatever snapshot they loaded.
//! - [`measure`]: the explicit "measure" phase. Hosts collect one layout pass
//!   worth of bounds and commit them as a single snapshot.
//! - [`state`]: [`WalkthroughState`], the step cursor and visibility flag.
//! - [`event`]: step-changed / finished notifications with RAII
//!   subscriptions.
//!
//! Everything here is single-threaded and synchronous. No operation blocks or
//! fails; out-of-range requests are absorbed as no-ops.

pub mod event;
pub mod measure;
pub mod registry;
pub mod state;

pub use event::{EventHub, FinishReason, Subscription, WalkthroughEvent};
pub use measure::{LayoutPass, PassMode};
pub use registry::{RegistrySnapshot, TargetList, TargetPosition, TargetRegistry};
pub use state::{NavAction, WalkthroughSnapshot, WalkthroughState};

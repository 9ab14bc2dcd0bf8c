#![forbid(unsafe_code)]

//! Walkthrough state machine.
//!
//! ```text
//!            start()                       next() / previous() / go_to_step()
//!   Hidden ──────────▶ Active ──┐               (index moves, stays visible)
//!     ▲                  ▲      │
//!     │                  └──────┘
//!     └──────────────── finish() / skip() / dismiss()
//! ```
//!
//! # Invariants
//!
//! 1. `index < steps.len()` whenever the list is non-empty; `index == 0`
//!    otherwise.
//! 2. Navigation never fails: boundary and out-of-range requests are
//!    absorbed as no-ops (logged at `debug`).
//! 3. Ending a session always leaves `visible == false`, `index == 0`, and
//!    an empty registry, whatever the prior state.
//! 4. `StepChanged` fires only when the index actually moves (or on
//!    `start`) while visible; `Finished` fires once per visible session.

use std::fmt;
use std::sync::Arc;

use coachmark_core::{Step, StepList};
use tracing::debug;

use crate::event::{EventHub, FinishReason, Subscription, WalkthroughEvent};
use crate::registry::{RegistrySnapshot, TargetList, TargetRegistry};

/// A user-facing navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Previous,
    Next,
    /// The finish control shown on the last step.
    Finish,
    /// The always-available dismiss control.
    Dismiss,
}

/// Walkthrough session state.
///
/// Owned by the hosting screen and handed to children by reference. The
/// registry is written through `&self` (see [`TargetRegistry`]); the
/// cursor is moved through `&mut self`.
pub struct WalkthroughState {
    steps: StepList,
    index: usize,
    visible: bool,
    registry: TargetRegistry,
    events: EventHub,
}

impl fmt::Debug for WalkthroughState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkthroughState")
            .field("steps", &self.steps.len())
            .field("index", &self.index)
            .field("visible", &self.visible)
            .field("registry", &self.registry)
            .field("events", &self.events)
            .finish()
    }
}

impl WalkthroughState {
    /// Create a session over `steps`. With `auto_start` the first step is
    /// visible immediately (no event fires before anyone can subscribe).
    pub fn new(steps: impl Into<StepList>, auto_start: bool) -> Self {
        Self {
            steps: steps.into(),
            index: 0,
            visible: auto_start,
            registry: TargetRegistry::new(),
            events: EventHub::new(),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    /// Total number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// 0-based cursor.
    pub fn current_step_index(&self) -> usize {
        self.index
    }

    /// 1-based cursor for display.
    pub fn step_number(&self) -> usize {
        self.index + 1
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The step under the cursor, or `None` for an empty list.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.steps.len()
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn is_last_step(&self) -> bool {
        !self.steps.is_empty() && self.index == self.steps.len() - 1
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    /// Registered positions for the current step's target key.
    pub fn current_targets(&self) -> TargetList {
        match self.current_step() {
            Some(step) => self.registry.get(&step.target_key),
            None => Arc::new([]),
        }
    }

    /// A consistent read of everything a frame needs.
    pub fn snapshot(&self) -> WalkthroughSnapshot {
        WalkthroughSnapshot {
            visible: self.visible,
            index: self.index,
            step_count: self.steps.len(),
            step: self.current_step().cloned(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            registry: self.registry.snapshot(),
        }
    }

    /// Listen for step changes and session ends.
    pub fn subscribe(&self, callback: impl Fn(&WalkthroughEvent) + 'static) -> Subscription {
        self.events.subscribe(callback)
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Show the walkthrough from the first step.
    ///
    /// An empty list still becomes visible; with no current step there is
    /// nothing to draw and no `StepChanged` fires.
    pub fn start(&mut self) {
        self.index = 0;
        self.visible = true;
        if self.steps.is_empty() {
            debug!("walkthrough started with no steps");
            return;
        }
        debug!(index = 0, total = self.steps.len(), "walkthrough started");
        self.emit_step_changed();
    }

    /// Advance one step; no-op on the last step.
    pub fn next(&mut self) {
        if !self.has_next() {
            debug!(index = self.index, "next ignored at last step");
            return;
        }
        self.move_to(self.index + 1);
    }

    /// Go back one step; no-op on the first step.
    pub fn previous(&mut self) {
        if !self.has_previous() {
            debug!(index = self.index, "previous ignored at first step");
            return;
        }
        self.move_to(self.index - 1);
    }

    /// Jump to `index` if it is in range; otherwise no-op.
    pub fn go_to_step(&mut self, index: usize) {
        if index >= self.steps.len() {
            debug!(
                requested = index,
                total = self.steps.len(),
                "go_to_step ignored: out of range"
            );
            return;
        }
        if index != self.index {
            self.move_to(index);
        }
    }

    /// Jump to the step with `id`; no-op for unknown ids.
    pub fn go_to_step_id(&mut self, id: &str) {
        match self.steps.position(id) {
            Some(index) => self.go_to_step(index),
            None => debug!(id, "go_to_step_id ignored: unknown id"),
        }
    }

    /// End the session as completed.
    pub fn finish(&mut self) {
        self.end(FinishReason::Completed);
    }

    /// End the session on the host's request.
    pub fn skip(&mut self) {
        self.end(FinishReason::Skipped);
    }

    /// End the session from the card's dismiss control.
    pub fn dismiss(&mut self) {
        self.end(FinishReason::Dismissed);
    }

    /// Apply a card control.
    ///
    /// `Finish` only completes the session on the last step; elsewhere it
    /// is ignored like any other unavailable control.
    pub fn activate(&mut self, action: NavAction) {
        match action {
            NavAction::Previous => self.previous(),
            NavAction::Next => self.next(),
            NavAction::Finish if self.is_last_step() => self.finish(),
            NavAction::Finish => debug!(index = self.index, "finish ignored before last step"),
            NavAction::Dismiss => self.dismiss(),
        }
    }

    fn move_to(&mut self, index: usize) {
        let from = self.index;
        self.index = index;
        debug!(from, to = index, total = self.steps.len(), "step changed");
        if self.visible {
            self.emit_step_changed();
        }
    }

    fn end(&mut self, reason: FinishReason) {
        let was_visible = self.visible;
        self.visible = false;
        self.index = 0;
        self.registry.clear_all();
        debug!(?reason, was_visible, "walkthrough finished");
        if was_visible {
            self.events.emit(&WalkthroughEvent::Finished { reason });
        }
    }

    fn emit_step_changed(&self) {
        if let Some(step) = self.current_step() {
            self.events.emit(&WalkthroughEvent::StepChanged {
                index: self.index,
                step: step.clone(),
            });
        }
    }
}

/// Immutable per-frame view of a [`WalkthroughState`].
#[derive(Debug, Clone)]
pub struct WalkthroughSnapshot {
    pub visible: bool,
    /// 0-based cursor.
    pub index: usize,
    pub step_count: usize,
    pub step: Option<Step>,
    pub has_next: bool,
    pub has_previous: bool,
    pub registry: Arc<RegistrySnapshot>,
}

impl WalkthroughSnapshot {
    /// 1-based cursor for display.
    pub fn step_number(&self) -> usize {
        self.index + 1
    }

    /// Whether an overlay should be drawn at all.
    pub fn is_active(&self) -> bool {
        self.visible && self.step.is_some()
    }

    /// Positions registered for the current step's key.
    pub fn targets(&self) -> TargetList {
        match &self.step {
            Some(step) => self.registry.list(&step.target_key),
            None => Arc::new([]),
        }
    }
}

#![forbid(unsafe_code)]

//! Two-phase layout reporting.
//!
//! Elements report their bounds into a [`LayoutPass`] while the host lays
//! out; nothing reaches the registry until [`LayoutPass::commit`], which
//! publishes every reported key in a single snapshot. This keeps the
//! "measure" phase separate from the "solve + render" phase that reads the
//! registry.
//!
//! A key reported several times in one pass owns all of those rectangles,
//! in report order, replacing whatever the key held before the pass. That
//! is how composite targets (a bar plus its floating button) are rebuilt
//! together instead of accumulating stale entries across passes.
//!
//! ```
//! use coachmark_core::{HighlightShape, Rect};
//! use coachmark_runtime::{LayoutPass, TargetRegistry};
//!
//! let registry = TargetRegistry::new();
//! let mut pass = LayoutPass::incremental(&registry);
//! pass.report("balance", Rect::new(16.0, 160.0, 368.0, 120.0), HighlightShape::RoundedRect);
//! pass.commit();
//! assert_eq!(registry.get("balance").len(), 1);
//! ```

use std::collections::BTreeMap;

use coachmark_core::{Anchor, HighlightShape, Rect, Size};
use tracing::debug;

use crate::registry::{TargetPosition, TargetRegistry};

/// What happens to keys that were not reported during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassMode {
    /// Unreported keys keep their previous positions.
    Incremental,
    /// Unreported keys are dropped: the pass describes every mounted target.
    Full,
}

/// One layout pass worth of target bounds.
///
/// Dropping a pass without committing discards it.
#[derive(Debug)]
#[must_use = "a layout pass does nothing until committed"]
pub struct LayoutPass<'a> {
    registry: &'a TargetRegistry,
    mode: PassMode,
    reported: BTreeMap<String, Vec<TargetPosition>>,
}

impl<'a> LayoutPass<'a> {
    /// Start a pass in the given mode.
    pub fn new(registry: &'a TargetRegistry, mode: PassMode) -> Self {
        Self {
            registry,
            mode,
            reported: BTreeMap::new(),
        }
    }

    /// A pass that only touches the keys it reports.
    pub fn incremental(registry: &'a TargetRegistry) -> Self {
        Self::new(registry, PassMode::Incremental)
    }

    /// A pass that replaces the whole registry.
    pub fn full(registry: &'a TargetRegistry) -> Self {
        Self::new(registry, PassMode::Full)
    }

    pub fn mode(&self) -> PassMode {
        self.mode
    }

    /// Report one element's bounds under `key`.
    pub fn report(&mut self, key: &str, rect: Rect, shape: HighlightShape) -> &mut Self {
        self.reported
            .entry(key.to_owned())
            .or_default()
            .push(TargetPosition::new(rect, shape));
        self
    }

    /// Report a synthetic target placed at `anchor` in `viewport`.
    pub fn report_anchored(
        &mut self,
        key: &str,
        anchor: Anchor,
        size: Size,
        viewport: Size,
        shape: HighlightShape,
    ) -> &mut Self {
        self.report(key, anchor.place(size, viewport), shape)
    }

    /// Mark `key` as present-but-empty: after commit it has no positions.
    ///
    /// Useful when an element unmounts during an incremental pass.
    pub fn vacate(&mut self, key: &str) -> &mut Self {
        self.reported.entry(key.to_owned()).or_default();
        self
    }

    /// Keys reported so far.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.reported.keys().map(String::as_str)
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    /// Publish the pass as one snapshot. Returns the registry version
    /// after the commit.
    pub fn commit(self) -> u64 {
        let Self {
            registry,
            mode,
            reported,
        } = self;
        let keys = reported.len();
        let changed = registry.apply(|snap| {
            let mut changed = false;
            if mode == PassMode::Full {
                changed |= snap.retain_keys(|k| reported.contains_key(k));
            }
            for (key, positions) in reported {
                changed |= snap.set(&key, positions);
            }
            changed
        });
        let version = registry.version();
        debug!(?mode, keys, changed, version, "layout pass committed");
        version
    }
}

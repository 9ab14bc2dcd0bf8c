#![forbid(unsafe_code)]

//! Copy-on-write target registry.
//!
//! Maps a logical target key to the ordered list of screen rectangles
//! currently tagged with it. One key may own several rectangles at once
//! (a bottom bar plus its floating button, for example).
//!
//! # Snapshot model
//!
//! The registry is a single value cell holding an immutable
//! [`RegistrySnapshot`]. Every mutation clones the current snapshot
//! (O(1) thanks to `im::OrdMap` structural sharing), edits the clone, and
//! publishes it with one atomic swap. Readers call
//! [`TargetRegistry::snapshot`] once per frame and keep reading that
//! `Arc` even while new layout passes land, so a frame never observes a
//! half-applied update.
//!
//! Per-key lists are `Arc<[TargetPosition]>`: a list handed out by
//! [`TargetRegistry::get`] is never mutated afterwards.
//!
//! # Invariants
//!
//! 1. `version` increases by exactly 1 per published snapshot.
//! 2. A key is present only while its list is non-empty.
//! 3. Insertion order is preserved within a key.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use coachmark_core::{Anchor, HighlightShape, Rect, Size};
use im::OrdMap;
use tracing::trace;

/// A registered target rectangle and the shape of its cut-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPosition {
    pub rect: Rect,
    pub shape: HighlightShape,
}

impl TargetPosition {
    #[inline]
    pub fn new(rect: Rect, shape: HighlightShape) -> Self {
        Self { rect, shape }
    }

    /// The highlight rectangle: `rect` grown by `padding` on every side.
    #[inline]
    pub fn highlight(&self, padding: f32) -> Rect {
        self.rect.inflate(padding)
    }
}

/// Immutable list of positions for one key.
pub type TargetList = Arc<[TargetPosition]>;

fn empty_list() -> TargetList {
    Arc::new([])
}

/// One published state of the registry.
#[derive(Clone, Default)]
pub struct RegistrySnapshot {
    entries: OrdMap<String, TargetList>,
    version: u64,
}

impl fmt::Debug for RegistrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrySnapshot")
            .field("version", &self.version)
            .field("entries", &self.entries)
            .finish()
    }
}

impl RegistrySnapshot {
    /// Positions for `key`; empty if the key is unknown.
    pub fn get(&self, key: &str) -> &[TargetPosition] {
        self.entries.get(key).map(|l| &l[..]).unwrap_or(&[])
    }

    /// Shared handle to the positions for `key`.
    pub fn list(&self, key: &str) -> TargetList {
        self.entries.get(key).cloned().unwrap_or_else(empty_list)
    }

    /// Highlight rectangles for `key`, padded, with their shapes.
    pub fn highlights(&self, key: &str, padding: f32) -> Vec<(Rect, HighlightShape)> {
        self.get(key)
            .iter()
            .map(|p| (p.highlight(padding), p.shape))
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total positions across all keys.
    pub fn position_count(&self) -> usize {
        self.entries.values().map(|l| l.len()).sum()
    }

    /// Monotonic publish counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ── Mutators (applied to a private clone before publishing) ─────────

    pub(crate) fn push(&mut self, key: &str, position: TargetPosition) {
        let mut list: Vec<TargetPosition> = self.get(key).to_vec();
        list.push(position);
        self.entries.insert(key.to_owned(), Arc::from(list));
    }

    /// Set a key's list; an empty list removes the key.
    pub(crate) fn set(&mut self, key: &str, positions: Vec<TargetPosition>) -> bool {
        if positions.is_empty() {
            return self.remove(key);
        }
        if self.get(key) == positions.as_slice() {
            return false;
        }
        self.entries.insert(key.to_owned(), Arc::from(positions));
        true
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub(crate) fn retain_keys(&mut self, keep: impl Fn(&str) -> bool) -> bool {
        let stale: Vec<String> = self
            .entries
            .keys()
            .filter(|k| !keep(k.as_str()))
            .cloned()
            .collect();
        for key in &stale {
            self.entries.remove(key.as_str());
        }
        !stale.is_empty()
    }

    pub(crate) fn clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.entries.clear();
        true
    }
}

/// The live registry cell.
///
/// All methods take `&self`: hosts write through a shared reference during
/// layout while the renderer reads snapshots. The engine assumes one
/// logical writer (the layout system); concurrent writers would race on
/// read-modify-publish.
pub struct TargetRegistry {
    cell: ArcSwap<RegistrySnapshot>,
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TargetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.cell.load();
        f.debug_struct("TargetRegistry")
            .field("version", &snap.version)
            .field("keys", &snap.len())
            .field("positions", &snap.position_count())
            .finish()
    }
}

impl TargetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: ArcSwap::from_pointee(RegistrySnapshot::default()),
        }
    }

    /// The current snapshot. Hold it for the duration of one frame.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.cell.load_full()
    }

    /// Positions for `key` in the current snapshot; empty if unknown.
    pub fn get(&self, key: &str) -> TargetList {
        self.cell.load().list(key)
    }

    /// Current publish counter.
    pub fn version(&self) -> u64 {
        self.cell.load().version
    }

    /// Append a position to `key` (multi-region keys accumulate).
    pub fn register(&self, key: &str, rect: Rect, shape: HighlightShape) {
        self.write(|snap| {
            snap.push(key, TargetPosition::new(rect, shape));
            true
        });
        trace!(key, x = rect.x, y = rect.y, w = rect.width, h = rect.height, "target registered");
    }

    /// [`register`](Self::register) from raw coordinates.
    pub fn register_xywh(
        &self,
        key: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        shape: HighlightShape,
    ) {
        self.register(key, Rect::new(x, y, width, height), shape);
    }

    /// Append a synthetic target of `size` placed at `anchor` in `viewport`.
    pub fn register_anchored(
        &self,
        key: &str,
        anchor: Anchor,
        size: Size,
        viewport: Size,
        shape: HighlightShape,
    ) {
        self.register(key, anchor.place(size, viewport), shape);
    }

    /// Atomically replace every position for `key`.
    ///
    /// An empty iterator removes the key.
    pub fn replace(&self, key: &str, positions: impl IntoIterator<Item = TargetPosition>) {
        let positions: Vec<TargetPosition> = positions.into_iter().collect();
        let count = positions.len();
        if self.write(|snap| snap.set(key, positions)) {
            trace!(key, count, "target replaced");
        }
    }

    /// Remove `key` entirely.
    pub fn clear(&self, key: &str) {
        if self.write(|snap| snap.remove(key)) {
            trace!(key, "target cleared");
        }
    }

    /// Remove every key.
    pub fn clear_all(&self) {
        if self.write(RegistrySnapshot::clear) {
            trace!("registry cleared");
        }
    }

    /// Apply a batch of edits as one published snapshot.
    pub(crate) fn apply(&self, edit: impl FnOnce(&mut RegistrySnapshot) -> bool) -> bool {
        self.write(edit)
    }

    fn write(&self, edit: impl FnOnce(&mut RegistrySnapshot) -> bool) -> bool {
        let mut next = RegistrySnapshot::clone(&self.cell.load());
        if !edit(&mut next) {
            return false;
        }
        next.version += 1;
        self.cell.store(Arc::new(next));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(y: f32) -> Rect {
        Rect::new(10.0, y, 100.0, 40.0)
    }

    // ── Basic contract ───────────────────────────────────────────────────

    #[test]
    fn unknown_key_is_empty() {
        let reg = TargetRegistry::new();
        assert!(reg.get("nope").is_empty());
        assert!(reg.snapshot().get("nope").is_empty());
    }

    #[test]
    fn register_appends_in_order() {
        let reg = TargetRegistry::new();
        reg.register("bar", rect(0.0), HighlightShape::RoundedRect);
        reg.register("bar", rect(50.0), HighlightShape::Circle);
        let list = reg.get("bar");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].rect, rect(0.0));
        assert_eq!(list[1].shape, HighlightShape::Circle);
    }

    #[test]
    fn replace_resets_list() {
        let reg = TargetRegistry::new();
        reg.register("bar", rect(0.0), HighlightShape::RoundedRect);
        reg.register("bar", rect(50.0), HighlightShape::RoundedRect);
        reg.replace(
            "bar",
            [TargetPosition::new(rect(90.0), HighlightShape::Oval)],
        );
        let list = reg.get("bar");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].rect, rect(90.0));
    }

    #[test]
    fn replace_with_nothing_removes_key() {
        let reg = TargetRegistry::new();
        reg.register("bar", rect(0.0), HighlightShape::RoundedRect);
        reg.replace("bar", std::iter::empty());
        assert!(!reg.snapshot().contains_key("bar"));
    }

    #[test]
    fn clear_removes_only_that_key() {
        let reg = TargetRegistry::new();
        reg.register("a", rect(0.0), HighlightShape::RoundedRect);
        reg.register("b", rect(0.0), HighlightShape::RoundedRect);
        reg.clear("a");
        let snap = reg.snapshot();
        assert!(!snap.contains_key("a"));
        assert!(snap.contains_key("b"));
    }

    #[test]
    fn clear_all_empties() {
        let reg = TargetRegistry::new();
        reg.register("a", rect(0.0), HighlightShape::RoundedRect);
        reg.register("b", rect(0.0), HighlightShape::RoundedRect);
        reg.clear_all();
        assert!(reg.snapshot().is_empty());
    }

    #[test]
    fn anchored_registration() {
        let reg = TargetRegistry::new();
        reg.register_anchored(
            "fab",
            Anchor::BottomCenter,
            Size::new(56.0, 56.0),
            Size::new(400.0, 800.0),
            HighlightShape::Circle,
        );
        let list = reg.get("fab");
        assert_eq!(list[0].rect, Rect::new(172.0, 728.0, 56.0, 56.0));
    }

    // ── Snapshot isolation ───────────────────────────────────────────────

    #[test]
    fn old_snapshot_survives_writes() {
        let reg = TargetRegistry::new();
        reg.register("k", rect(0.0), HighlightShape::RoundedRect);
        let before = reg.snapshot();
        let before_list = reg.get("k");

        reg.register("k", rect(50.0), HighlightShape::RoundedRect);
        reg.clear_all();

        assert_eq!(before.get("k").len(), 1);
        assert_eq!(before_list.len(), 1);
        assert!(reg.get("k").is_empty());
    }

    // ── Versioning ───────────────────────────────────────────────────────

    #[test]
    fn version_counts_published_snapshots() {
        let reg = TargetRegistry::new();
        assert_eq!(reg.version(), 0);
        reg.register("k", rect(0.0), HighlightShape::RoundedRect);
        assert_eq!(reg.version(), 1);
        reg.clear("missing");
        assert_eq!(reg.version(), 1, "no-op clear publishes nothing");
        reg.replace("k", [TargetPosition::new(rect(0.0), HighlightShape::RoundedRect)]);
        assert_eq!(reg.version(), 1, "identical replace publishes nothing");
        reg.clear_all();
        assert_eq!(reg.version(), 2);
    }

    #[test]
    fn highlights_apply_padding() {
        let reg = TargetRegistry::new();
        reg.register("k", Rect::new(10.0, 10.0, 20.0, 20.0), HighlightShape::Oval);
        let hl = reg.snapshot().highlights("k", 5.0);
        assert_eq!(hl, vec![(Rect::new(5.0, 5.0, 30.0, 30.0), HighlightShape::Oval)]);
    }
}

#![forbid(unsafe_code)]

//! Memoized placement results.
//!
//! An overlay re-solves on every frame, but the inputs only change when the
//! registry publishes, the viewport resizes, or the card is re-measured.
//! [`PlacementCache`] keys solved placements by the exact bit patterns of all
//! solver inputs, so repeated frames are lookups.
//!
//! Invalidation is generation-based: [`PlacementCache::invalidate_all`] is
//! O(1) and makes every entry stale. Geometry changes need no invalidation
//! because the geometry is part of the key.

use coachmark_core::{Rect, Size};
use rustc_hash::FxHashMap;

use crate::placement::{CardPlacement, PlacementConfig, solve_card_position};

/// Bit-exact copy of one solver invocation's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementKey {
    highlights: Box<[[u32; 4]]>,
    viewport: [u32; 2],
    card: [u32; 2],
    config: [u32; 3],
}

impl PlacementKey {
    pub fn new(highlights: &[Rect], viewport: Size, card: Size, config: &PlacementConfig) -> Self {
        Self {
            highlights: highlights
                .iter()
                .map(|r| {
                    [
                        r.x.to_bits(),
                        r.y.to_bits(),
                        r.width.to_bits(),
                        r.height.to_bits(),
                    ]
                })
                .collect(),
            viewport: [viewport.width.to_bits(), viewport.height.to_bits()],
            card: [card.width.to_bits(), card.height.to_bits()],
            config: [
                config.spacing.to_bits(),
                config.margin.to_bits(),
                config.fallback_card_height.to_bits(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedPlacement {
    placement: CardPlacement,
    generation: u64,
    access_count: u32,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Default)]
pub struct PlacementCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Fraction of lookups served from the cache (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Bounded memo of [`solve_card_position`] results.
///
/// When full, stale entries go first, then the least frequently used one.
#[derive(Debug)]
pub struct PlacementCache {
    entries: FxHashMap<PlacementKey, CachedPlacement>,
    generation: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl Default for PlacementCache {
    fn default() -> Self {
        Self::new(32)
    }
}

impl PlacementCache {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: FxHashMap::with_capacity_and_hasher(max_entries, Default::default()),
            generation: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Cached placement for these inputs, solving on a miss.
    pub fn solve(
        &mut self,
        highlights: &[Rect],
        viewport: Size,
        card: Size,
        config: &PlacementConfig,
    ) -> CardPlacement {
        let key = PlacementKey::new(highlights, viewport, card, config);
        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
        {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            return entry.placement;
        }

        self.misses += 1;
        let placement = solve_card_position(highlights, viewport, card, config);
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.evict_least_used();
        }
        self.entries.insert(
            key,
            CachedPlacement {
                placement,
                generation: self.generation,
                access_count: 1,
            },
        );
        placement
    }

    /// Make every entry stale.
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> PlacementCacheStats {
        let total = self.hits + self.misses;
        PlacementCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    fn evict_least_used(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| (e.generation == self.generation, e.access_count))
            .map(|(k, _)| k.clone())
        {
            self.entries.remove(&key);
        }
    }
}

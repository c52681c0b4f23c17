use dashmap::DashMap;
use tracing::debug;

use crate::feedstock::FeedstockCategory;
use crate::yield_model::{RegimeRule, YieldClassifier, YieldDistribution};

type CacheKey = (FeedstockCategory, u64);

/// Entry limit used by [`MemoizedYieldModel::new`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// Memoizing wrapper around a classifier, safe to share across threads.
///
/// Temperatures are continuous, so the entry count is capped: a miss that
/// finds the map full flushes it before inserting. Concurrent misses may
/// overshoot the cap by at most the number of racing callers.
pub struct MemoizedYieldModel<C> {
    inner: C,
    entries: DashMap<CacheKey, RegimeRule>,
    capacity: usize,
}

impl<C: YieldClassifier> MemoizedYieldModel<C> {
    pub fn new(inner: C) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(inner: C, capacity: usize) -> Self {
        MemoizedYieldModel {
            inner,
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn key(feedstock: FeedstockCategory, temperature_c: f64) -> CacheKey {
        // -0.0 and 0.0 compare equal and must share an entry.
        let t = if temperature_c == 0.0 { 0.0 } else { temperature_c };
        (feedstock, t.to_bits())
    }

    fn fill(&self, key: CacheKey, feedstock: FeedstockCategory, temperature_c: f64) -> RegimeRule {
        let rule = self.inner.regime(feedstock, temperature_c);
        // No shard guard may be live here: clear() takes every write lock.
        if self.entries.len() >= self.capacity {
            debug!(capacity = self.capacity, "regime cache full, flushing");
            self.entries.clear();
        }
        self.entries.insert(key, rule.clone());
        rule
    }
}

impl<C: YieldClassifier> YieldClassifier for MemoizedYieldModel<C> {
    fn regime(&self, feedstock: FeedstockCategory, temperature_c: f64) -> RegimeRule {
        let key = Self::key(feedstock, temperature_c);
        if let Some(hit) = self.entries.get(&key) {
            return hit.value().clone();
        }
        self.fill(key, feedstock, temperature_c)
    }

    fn classify(&self, feedstock: FeedstockCategory, temperature_c: f64) -> YieldDistribution {
        let key = Self::key(feedstock, temperature_c);
        if let Some(hit) = self.entries.get(&key) {
            return hit.distribution;
        }
        self.fill(key, feedstock, temperature_c).distribution
    }
}

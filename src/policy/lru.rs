//! # Bounded (LRU) Memo Store
//!
//! [`LruTrieCache`] keeps at most `capacity` distinct key tuples. Its trie
//! leaves hold [`SlotId`]s into a fixed-capacity [`SlotArena`] that owns the
//! key tuples and values and threads the global recency list.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LruTrieCache<K, V>                              │
//!   │                                                                          │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  KeyTrie<K, SlotId>                                              │   │
//!   │   │                                                                  │   │
//!   │   │   root ─┬─ a ─► Leaf { 1 ─► slot#2, 2 ─► slot#1 }                │   │
//!   │   │         └─ b ─► Leaf { 1 ─► slot#3 }                             │   │
//!   │   └────────────────────────────────────┬─────────────────────────────┘   │
//!   │                                        │ SlotId (non-owning)             │
//!   │                                        ▼                                 │
//!   │   ┌──────────────────────────────────────────────────────────────────┐   │
//!   │   │  SlotArena<Entry<K, V>>        (capacity + 2 slots)              │   │
//!   │   │                                                                  │   │
//!   │   │  [0] ──► [slot#2] ◄──► [slot#3] ◄──► [slot#1] ──► [cap+1]        │   │
//!   │   │  LRU     (a,1)         (b,1)         (a,2)        MRU            │   │
//!   │   │  sentinel                                         sentinel       │   │
//!   │   └──────────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   HIT  get_or_insert_with((a,1))
//!     1. resolve leaf for prefix (a)
//!     2. leaf[1] = slot#2 ─► touch(slot#2) ─► return value
//!
//!   MISS get_or_insert_with((c,9)), cache full
//!     1. compute value (nothing changes if it fails)
//!     2. allocate() recycles the LRU slot, here slot#2 holding (a,1)
//!     3. remove_cascading((a,1)); level `a` survives, it still holds 2
//!     4. reuse the slot's key buffer for (c,9), store the value, touch
//!     5. register (c,9) ─► slot#2 in the trie
//! ```
//!
//! | Operation              | Time   | Notes                                 |
//! |------------------------|--------|---------------------------------------|
//! | hit                    | O(N)   | N trie levels + O(1) touch            |
//! | miss, below capacity   | O(N)   | fresh slot                            |
//! | miss, at capacity      | O(N)   | evict + cascading delete + insert     |
//! | `peek` / `contains`    | O(N)   | no recency change                     |
//! | `recency_rank` / `iter`| O(n)   | walks the recency list                |
//!
//! Recency is global: the `(capacity + 1)`-th distinct tuple always evicts
//! the least-recently-touched tuple in the whole cache, regardless of which
//! trie branch it lives in. Both hits and insertions count as touches.
//!
//! ## Thread Safety
//!
//! Single-threaded. Wrap the owning memoizer in a lock to share it.

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::MemoMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::MemoMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider, PeekMetricsReadRecorder,
};

use crate::ds::key_trie::KeyTrie;
use crate::ds::slot_arena::{Allocation, SlotArena, SlotId};
use crate::error::{InvariantError, MemoError};
use crate::traits::MemoStore;

/// Arena payload: the full key tuple (needed to find the trie path again on
/// eviction) and the cached value.
#[derive(Debug)]
struct Entry<K, V> {
    key: Vec<K>,
    value: V,
}

/// Memo store bounded to `capacity` entries with LRU eviction.
pub struct LruTrieCache<K, V> {
    trie: KeyTrie<K, SlotId>,
    arena: SlotArena<Entry<K, V>>,
    #[cfg(feature = "metrics")]
    metrics: MemoMetrics,
}

impl<K, V> LruTrieCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty store for keys of `arity` components holding at most
    /// `capacity` entries.
    ///
    /// # Errors
    ///
    /// - [`MemoError::UnsupportedArity`] if `arity` is 0.
    /// - [`MemoError::InvalidArgument`] if `capacity` is 0 or too large to
    ///   index.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruTrieCache;
    /// use memokit::traits::MemoStore;
    ///
    /// let mut cache: LruTrieCache<u32, u32> = LruTrieCache::try_new(1, 2).unwrap();
    /// cache.get_or_insert_with(&[1], |a| a[0]).unwrap();
    /// cache.get_or_insert_with(&[2], |a| a[0]).unwrap();
    /// cache.get_or_insert_with(&[1], |a| a[0]).unwrap(); // refresh 1
    /// cache.get_or_insert_with(&[3], |a| a[0]).unwrap(); // evicts 2
    ///
    /// assert!(cache.contains(&[1]));
    /// assert!(!cache.contains(&[2]));
    /// assert!(cache.contains(&[3]));
    /// ```
    pub fn try_new(arity: usize, capacity: usize) -> Result<Self, MemoError> {
        Self::try_with_reserve(arity, capacity, 0)
    }

    /// Like [`try_new`](Self::try_new), pre-sizing the first trie level for
    /// `reserve` distinct first components (clamped to `capacity`).
    pub fn try_with_reserve(
        arity: usize,
        capacity: usize,
        reserve: usize,
    ) -> Result<Self, MemoError> {
        if arity == 0 {
            return Err(MemoError::UnsupportedArity);
        }
        if capacity == 0 {
            return Err(MemoError::invalid_argument("capacity must be at least 1"));
        }
        let arena = SlotArena::try_with_capacity(capacity)?;
        let reserve = reserve.min(capacity);
        let trie = KeyTrie::try_with_root_capacity(arity, reserve).map_err(|err| {
            MemoError::invalid_argument(format!("cannot reserve {reserve} entries: {err}"))
        })?;
        Ok(Self {
            trie,
            arena,
            #[cfg(feature = "metrics")]
            metrics: MemoMetrics::default(),
        })
    }

    /// Maximum number of cached tuples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns `true` once every slot has been handed out; from then on each
    /// miss evicts.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.arena.is_full()
    }

    /// Key and value of the least-recently-touched entry (next to be evicted).
    pub fn peek_lru(&self) -> Option<(&[K], &V)> {
        let slot = self.arena.lru()?;
        let entry = self.arena.get(slot)?;
        Some((entry.key.as_slice(), &entry.value))
    }

    /// Key and value of the most-recently-touched entry.
    pub fn peek_mru(&self) -> Option<(&[K], &V)> {
        let slot = self.arena.mru()?;
        let entry = self.arena.get(slot)?;
        Some((entry.key.as_slice(), &entry.value))
    }

    /// Position of `args` in recency order, 0 being the most recently touched.
    ///
    /// Walks the recency list; O(n).
    pub fn recency_rank(&self, args: &[K]) -> Option<usize> {
        let &target = self.trie.get(args)?;
        let position = self.arena.iter().position(|(slot, _)| slot == target)?;
        Some(self.arena.len() - 1 - position)
    }

    /// Iterates cached entries from least to most recently touched.
    pub fn iter(&self) -> impl Iterator<Item = (&[K], &V)> + '_ {
        self.arena
            .iter()
            .map(|(_, entry)| (entry.key.as_slice(), &entry.value))
    }

    /// Cross-checks the recency list, the slot count and the trie.
    ///
    /// Every linked slot must be reachable from the trie under its own key
    /// and the trie must hold exactly as many keys as the arena has handed
    /// out.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.arena.check_invariants()?;

        let stored = self.trie.count();
        if stored != self.arena.len() {
            return Err(InvariantError::new(format!(
                "trie holds {stored} keys, arena holds {} entries",
                self.arena.len()
            )));
        }
        for (slot, entry) in self.arena.iter() {
            if entry.key.len() != self.trie.arity() {
                return Err(InvariantError::new(format!(
                    "{slot} key has {} components, arity is {}",
                    entry.key.len(),
                    self.trie.arity()
                )));
            }
            match self.trie.get(&entry.key) {
                Some(&indexed) if indexed == slot => {},
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "{slot} key is indexed at {indexed}"
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "{slot} key is missing from the trie"
                    )));
                },
            }
        }
        Ok(())
    }

    /// Evicts the entry in `slot` from the trie and hands back its key buffer
    /// (emptied) for reuse.
    fn evict(&mut self, slot: SlotId) -> Vec<K> {
        let mut key = std::mem::take(&mut self.arena[slot].key);
        let removed = self.trie.remove_cascading(&key);
        debug_assert_eq!(removed.map(|(handle, _)| handle), Some(slot));

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_eviction();
            if let Some((_, pruned)) = removed {
                self.metrics.record_pruned_branches(pruned);
            }
        }
        #[cfg(not(feature = "metrics"))]
        let _ = removed;

        key.clear();
        key
    }
}

impl<K, V> MemoStore for LruTrieCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Key = K;
    type Value = V;

    #[inline]
    fn arity(&self) -> usize {
        self.trie.arity()
    }

    #[inline]
    fn len(&self) -> usize {
        self.arena.len()
    }

    fn contains(&self, args: &[K]) -> bool {
        self.trie.get(args).is_some()
    }

    fn peek(&self, args: &[K]) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let &slot = self.trie.get(args)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        self.arena.get(slot).map(|entry| &entry.value)
    }

    fn get_or_try_insert_with<E, F>(&mut self, args: &[K], compute: F) -> Result<&V, E>
    where
        E: From<MemoError>,
        F: FnOnce(&[K]) -> Result<V, E>,
    {
        if let Err(err) = MemoError::check_arity(self.trie.arity(), args.len()) {
            #[cfg(feature = "metrics")]
            self.metrics.record_arity_mismatch();
            return Err(err.into());
        }

        if let Some(&slot) = self.trie.get(args) {
            #[cfg(feature = "metrics")]
            self.metrics.record_call_hit();

            self.arena.touch(slot);
            return Ok(&self.arena[slot].value);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_call_miss();

        // nothing is allocated or evicted until the value exists
        let value = match compute(args) {
            Ok(value) => value,
            Err(err) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_compute_failure();
                return Err(err);
            },
        };

        let (slot, mut key) = match self.arena.allocate() {
            Some(Allocation::Fresh(slot)) => (slot, Vec::with_capacity(args.len())),
            Some(Allocation::Recycled(slot)) => (slot, self.evict(slot)),
            None => unreachable!("capacity is validated to be at least 1"),
        };
        key.extend_from_slice(args);
        self.arena.replace(slot, Entry { key, value });
        self.arena.touch(slot);
        self.trie.insert(args, slot);

        #[cfg(feature = "metrics")]
        self.metrics.record_insert();

        Ok(&self.arena[slot].value)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<MemoMetricsSnapshot> for LruTrieCache<K, V> {
    fn snapshot(&self) -> MemoMetricsSnapshot {
        MemoMetricsSnapshot::from_metrics(
            &self.metrics,
            self.arena.len(),
            Some(self.arena.capacity()),
        )
    }
}

impl<K, V> fmt::Debug for LruTrieCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruTrieCache")
            .field("arity", &self.arity())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

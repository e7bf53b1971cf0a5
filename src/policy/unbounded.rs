//! # Unbounded Memo Store
//!
//! [`UnboundedCache`] keeps every result it ever computed. It is a
//! [`KeyTrie`] whose leaves hold the values directly:
//!
//! ```text
//!   arity = 2
//!
//!   root ─┬─ "a" ─► Leaf { 1 ─► V, 2 ─► V }
//!         └─ "b" ─► Leaf { 1 ─► V }
//!
//!   get_or_insert_with(["b", 2]):
//!     1. walk level "b", leaf miss on 2
//!     2. compute ─► create missing levels ─► store ─► return &V
//! ```
//!
//! Memory grows with the number of distinct tuples seen; nothing is ever
//! evicted. Use [`LruTrieCache`](crate::policy::lru::LruTrieCache) when the
//! key space is unbounded.

use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::MemoMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::MemoMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider, PeekMetricsReadRecorder};

use crate::ds::key_trie::KeyTrie;
use crate::error::MemoError;
use crate::traits::MemoStore;

/// Memo store without a size bound.
pub struct UnboundedCache<K, V> {
    trie: KeyTrie<K, V>,
    len: usize,
    #[cfg(feature = "metrics")]
    metrics: MemoMetrics,
}

impl<K, V> UnboundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty store for keys of `arity` components.
    ///
    /// # Errors
    ///
    /// Returns [`MemoError::UnsupportedArity`] if `arity` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::unbounded::UnboundedCache;
    /// use memokit::traits::MemoStore;
    ///
    /// let mut cache: UnboundedCache<u64, u64> = UnboundedCache::try_new(2).unwrap();
    /// let sum = cache.get_or_insert_with(&[2, 3], |args| args[0] + args[1]).unwrap();
    /// assert_eq!(*sum, 5);
    /// ```
    pub fn try_new(arity: usize) -> Result<Self, MemoError> {
        Self::try_with_reserve(arity, 0)
    }

    /// Creates an empty store for an arity known to be valid.
    pub fn new(arity: NonZeroUsize) -> Self {
        Self::with_trie(KeyTrie::new(arity.get()))
    }

    /// Like [`try_new`](Self::try_new), pre-sizing the first trie level for
    /// `reserve` distinct first components.
    pub fn try_with_reserve(arity: usize, reserve: usize) -> Result<Self, MemoError> {
        if arity == 0 {
            return Err(MemoError::UnsupportedArity);
        }
        let trie = KeyTrie::try_with_root_capacity(arity, reserve).map_err(|err| {
            MemoError::invalid_argument(format!("cannot reserve {reserve} entries: {err}"))
        })?;
        Ok(Self::with_trie(trie))
    }

    fn with_trie(trie: KeyTrie<K, V>) -> Self {
        Self {
            trie,
            len: 0,
            #[cfg(feature = "metrics")]
            metrics: MemoMetrics::default(),
        }
    }

    /// Visits every cached `(key, value)` pair in unspecified order.
    pub fn for_each(&self, visit: impl FnMut(&[K], &V)) {
        self.trie.for_each(visit);
    }
}

impl<K, V> MemoStore for UnboundedCache<K, V>
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
        self.len
    }

    fn contains(&self, args: &[K]) -> bool {
        self.trie.get(args).is_some()
    }

    fn peek(&self, args: &[K]) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let value = self.trie.get(args);

        #[cfg(feature = "metrics")]
        if value.is_some() {
            (&self.metrics).record_peek_found();
        }

        value
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

        if self.trie.get(args).is_none() {
            #[cfg(feature = "metrics")]
            self.metrics.record_call_miss();

            // levels are only created once there is a value to store
            let value = match compute(args) {
                Ok(value) => value,
                Err(err) => {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_compute_failure();
                    return Err(err);
                },
            };
            self.len += 1;

            #[cfg(feature = "metrics")]
            self.metrics.record_insert();

            return match self.trie.insert_and_get(args, value) {
                Some(value) => Ok(&*value),
                None => unreachable!("arity checked on entry"),
            };
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_call_hit();

        match self.trie.get(args) {
            Some(value) => Ok(value),
            None => unreachable!("hit checked above"),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<MemoMetricsSnapshot> for UnboundedCache<K, V> {
    fn snapshot(&self) -> MemoMetricsSnapshot {
        MemoMetricsSnapshot::from_metrics(&self.metrics, self.len, None)
    }
}

impl<K, V> fmt::Debug for UnboundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnboundedCache")
            .field("arity", &self.arity())
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn zero_arity_is_rejected() {
        let err = UnboundedCache::<u32, u32>::try_new(0).unwrap_err();
        assert_eq!(err, MemoError::UnsupportedArity);
    }

    #[test]
    fn repeated_calls_compute_once() {
        let mut cache: UnboundedCache<u32, u32> = UnboundedCache::try_new(1).unwrap();
        let calls = Cell::new(0);
        for _ in 0..5 {
            let value = cache
                .get_or_insert_with(&[7], |args| {
                    calls.set(calls.get() + 1);
                    args[0] * 3
                })
                .unwrap();
            assert_eq!(*value, 21);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_tuples_each_compute_once() {
        let mut cache: UnboundedCache<u32, u32> = UnboundedCache::try_new(1).unwrap();
        let calls = Cell::new(0);
        for round in 0..3 {
            for key in 0..50u32 {
                let value = *cache
                    .get_or_insert_with(&[key], |args| {
                        calls.set(calls.get() + 1);
                        args[0] + 1
                    })
                    .unwrap();
                assert_eq!(value, key + 1, "round {round}");
            }
        }
        assert_eq!(calls.get(), 50);
        assert_eq!(cache.len(), 50);
    }

    #[test]
    fn multi_arity_keys_are_positional() {
        let mut cache: UnboundedCache<i64, i64> = UnboundedCache::try_new(3).unwrap();
        let f = |args: &[i64]| args[0] * 100 + args[1] * 10 + args[2];
        assert_eq!(*cache.get_or_insert_with(&[1, 2, 3], f).unwrap(), 123);
        assert_eq!(*cache.get_or_insert_with(&[3, 2, 1], f).unwrap(), 321);
        assert_eq!(*cache.get_or_insert_with(&[1, 2, 3], |_| -1).unwrap(), 123);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&[3, 2, 1]));
        assert!(!cache.contains(&[1, 2, 4]));
    }

    #[test]
    fn arity_mismatch_fails_without_computing() {
        let mut cache: UnboundedCache<u32, u32> = UnboundedCache::try_new(2).unwrap();
        let err = cache
            .get_or_insert_with(&[1], |_| panic!("must not compute"))
            .unwrap_err();
        assert_eq!(
            err,
            MemoError::ArityMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(cache.is_empty());
    }

    #[derive(Debug, PartialEq)]
    enum LookupError {
        Memo(MemoError),
        NotFound(u32),
    }

    impl From<MemoError> for LookupError {
        fn from(err: MemoError) -> Self {
            LookupError::Memo(err)
        }
    }

    #[test]
    fn failed_compute_is_not_cached() {
        let mut cache: UnboundedCache<u32, String> = UnboundedCache::try_new(1).unwrap();
        let err = cache
            .get_or_try_insert_with(&[4], |args| Err(LookupError::NotFound(args[0])))
            .unwrap_err();
        assert_eq!(err, LookupError::NotFound(4));
        assert!(!cache.contains(&[4]));
        assert_eq!(cache.len(), 0);
        assert!(cache.trie.is_empty());

        let value = cache
            .get_or_try_insert_with::<LookupError, _>(&[4], |_| Ok("four".to_string()))
            .unwrap();
        assert_eq!(value, "four");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn peek_reads_without_computing() {
        let mut cache: UnboundedCache<&str, usize> = UnboundedCache::try_new(1).unwrap();
        assert_eq!(cache.peek(&["hello"]), None);
        cache.get_or_insert_with(&["hello"], |args| args[0].len()).unwrap();
        assert_eq!(cache.peek(&["hello"]), Some(&5));
        assert_eq!(cache.peek(&["hello", "world"]), None);
    }

    #[test]
    fn for_each_sees_every_entry() {
        let mut cache: UnboundedCache<u8, u8> = UnboundedCache::try_new(2).unwrap();
        for a in 0..3u8 {
            for b in 0..2u8 {
                cache.get_or_insert_with(&[a, b], |args| args[0] + args[1]).unwrap();
            }
        }
        let mut total = 0usize;
        cache.for_each(|key, value| {
            assert_eq!(key[0] + key[1], *value);
            total += 1;
        });
        assert_eq!(total, 6);
    }

    /// Key component that counts how often it is cloned.
    #[derive(Debug)]
    struct CountedKey<'a> {
        id: u32,
        clones: &'a Cell<usize>,
    }

    impl PartialEq for CountedKey<'_> {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for CountedKey<'_> {}

    impl std::hash::Hash for CountedKey<'_> {
        fn hash<S: std::hash::Hasher>(&self, state: &mut S) {
            self.id.hash(state);
        }
    }

    impl Clone for CountedKey<'_> {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                id: self.id,
                clones: self.clones,
            }
        }
    }

    #[test]
    fn hits_do_not_clone_key_components() {
        let clones = Cell::new(0);
        let key = [1, 2, 3].map(|id| CountedKey {
            id,
            clones: &clones,
        });
        let mut cache = UnboundedCache::try_new(3).unwrap();
        cache.get_or_insert_with(&key, |args| args.len()).unwrap();
        let after_insert = clones.get();

        for _ in 0..100 {
            assert_eq!(cache.get_or_insert_with(&key, |_| 0).unwrap(), &3);
        }
        assert_eq!(clones.get(), after_insert);
    }

    #[test]
    fn oversized_reserve_is_invalid() {
        let err = UnboundedCache::<u32, u32>::try_with_reserve(2, usize::MAX).unwrap_err();
        assert!(matches!(err, MemoError::InvalidArgument(_)));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_misses_and_failures() {
        let mut cache: UnboundedCache<u32, u32> = UnboundedCache::try_new(1).unwrap();
        cache.get_or_insert_with(&[1], |a| a[0]).unwrap();
        cache.get_or_insert_with(&[1], |a| a[0]).unwrap();
        let _ = cache.get_or_try_insert_with(&[2], |_| Err(MemoError::invalid_argument("boom")));
        let _ = cache.get_or_insert_with(&[1, 2], |a| a[0]);
        cache.peek(&[1]);

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.call_hits, 1);
        assert_eq!(snapshot.call_misses, 2);
        assert_eq!(snapshot.inserts, 1);
        assert_eq!(snapshot.compute_failures, 1);
        assert_eq!(snapshot.arity_mismatches, 1);
        assert_eq!(snapshot.peek_found, 1);
        assert_eq!(snapshot.cache_len, 1);
        assert_eq!(snapshot.capacity, None);
    }
}

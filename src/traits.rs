//! # Memo Store Trait
//!
//! [`MemoStore`] is the seam between a memoized callable
//! ([`Memoized`](crate::builder::Memoized)) and the structure that keeps its
//! results. Both store variants implement it:
//!
//! ```text
//!                        ┌──────────────────────────────────────────┐
//!                        │               MemoStore                  │
//!                        │                                          │
//!                        │  arity() / len() / is_empty()            │
//!                        │  contains(&[K]) / peek(&[K])             │
//!                        │  get_or_try_insert_with(&[K], compute)   │
//!                        │  get_or_insert_with(&[K], compute)       │
//!                        └────────────────────┬─────────────────────┘
//!                                             │
//!                    ┌────────────────────────┴────────────────────────┐
//!                    ▼                                                 ▼
//!      ┌────────────────────────────┐                   ┌────────────────────────────┐
//!      │  UnboundedCache<K, V>      │                   │  LruTrieCache<K, V>        │
//!      │  KeyTrie<K, V>             │                   │  KeyTrie<K, SlotId>        │
//!      │  never evicts              │                   │  + SlotArena<Entry<K, V>>  │
//!      └────────────────────────────┘                   └────────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! - A key is a slice of exactly `arity()` components. Lookups with any other
//!   length miss; `get_or_*` calls return [`MemoError::ArityMismatch`].
//! - `compute` runs at most once per call and only on a miss. If it fails the
//!   error is returned unchanged and nothing is stored.
//! - `peek`/`contains` never change recency or create trie levels.

use crate::error::MemoError;

/// Storage for memoized results keyed by fixed-arity tuples.
pub trait MemoStore {
    /// Key component type.
    type Key;
    /// Cached result type.
    type Value;

    /// Number of key components every call must supply.
    fn arity(&self) -> usize;

    /// Number of cached tuples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a result for `args` is cached.
    fn contains(&self, args: &[Self::Key]) -> bool;

    /// Returns the cached result for `args` without touching recency.
    fn peek(&self, args: &[Self::Key]) -> Option<&Self::Value>;

    /// Returns the cached result for `args`, computing and storing it on a
    /// miss.
    ///
    /// # Errors
    ///
    /// Returns `E::from(MemoError::ArityMismatch { .. })` when `args` has the
    /// wrong length, or the error produced by `compute`.
    fn get_or_try_insert_with<E, F>(
        &mut self,
        args: &[Self::Key],
        compute: F,
    ) -> Result<&Self::Value, E>
    where
        E: From<MemoError>,
        F: FnOnce(&[Self::Key]) -> Result<Self::Value, E>;

    /// Infallible form of [`get_or_try_insert_with`](Self::get_or_try_insert_with).
    fn get_or_insert_with<F>(
        &mut self,
        args: &[Self::Key],
        compute: F,
    ) -> Result<&Self::Value, MemoError>
    where
        F: FnOnce(&[Self::Key]) -> Self::Value,
    {
        self.get_or_try_insert_with(args, |args| Ok(compute(args)))
    }
}

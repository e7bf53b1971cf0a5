//! Memoizer construction and the callable wrapper.
//!
//! [`MemoBuilder`] validates arity and capacity up front and pairs a store
//! with the function it caches. The result, [`Memoized`], is the thing you
//! call.
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::MemoBuilder;
//! use memokit::prelude::MemoStore;
//!
//! let mut area = MemoBuilder::new()
//!     .arity(2)
//!     .capacity(128)
//!     .build_lru(|args: &[u64]| args[0] * args[1])
//!     .unwrap();
//!
//! assert_eq!(area.call(&[3, 4]), Ok(&12));
//! assert_eq!(area.call(&[3, 4]), Ok(&12)); // cached
//! assert_eq!(area.store().len(), 1);
//! ```

use std::fmt;
use std::hash::Hash;

use crate::error::MemoError;
use crate::policy::lru::LruTrieCache;
use crate::policy::unbounded::UnboundedCache;
use crate::traits::MemoStore;

/// Memoizer backed by an [`UnboundedCache`].
pub type UnboundedMemo<K, V, F> = Memoized<UnboundedCache<K, V>, F>;

/// Memoizer backed by an [`LruTrieCache`].
pub type LruMemo<K, V, F> = Memoized<LruTrieCache<K, V>, F>;

/// Configuration for a memoizer.
///
/// | Setting        | Required by            | Validation                    |
/// |----------------|------------------------|-------------------------------|
/// | `arity`        | every build            | `>= 1`, else `UnsupportedArity` |
/// | `capacity`     | `build_lru*`           | `>= 1`, else `InvalidArgument`  |
/// | `with_reserve` | optional               | sizing hint only              |
#[derive(Debug, Clone, Default)]
pub struct MemoBuilder {
    arity: Option<usize>,
    capacity: Option<usize>,
    reserve: usize,
}

impl MemoBuilder {
    /// Creates a builder with no arity, no capacity and no reservation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of key components every call supplies.
    pub fn arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Sets the maximum number of cached tuples for the bounded variant.
    ///
    /// Ignored by [`build`](Self::build).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Pre-sizes the first trie level for `reserve` distinct first
    /// components.
    pub fn with_reserve(mut self, reserve: usize) -> Self {
        self.reserve = reserve;
        self
    }

    fn checked_arity(&self) -> Result<usize, MemoError> {
        match self.arity {
            Some(arity) if arity > 0 => Ok(arity),
            _ => Err(MemoError::UnsupportedArity),
        }
    }

    fn checked_capacity(&self) -> Result<usize, MemoError> {
        self.capacity
            .ok_or_else(|| MemoError::invalid_argument("a bounded memoizer needs a capacity"))
    }

    /// Builds an unbounded memoizer around `func`.
    ///
    /// # Errors
    ///
    /// [`MemoError::UnsupportedArity`] if no arity (or 0) was set.
    pub fn build<K, V, F>(self, func: F) -> Result<UnboundedMemo<K, V, F>, MemoError>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&[K]) -> V,
    {
        self.unbounded(func)
    }

    /// Builds an unbounded memoizer around a fallible `func`; call it with
    /// [`Memoized::try_call`].
    pub fn build_fallible<K, V, E, F>(self, func: F) -> Result<UnboundedMemo<K, V, F>, MemoError>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&[K]) -> Result<V, E>,
    {
        self.unbounded(func)
    }

    /// Builds a memoizer that keeps the `capacity` most recently used
    /// results.
    ///
    /// # Errors
    ///
    /// - [`MemoError::UnsupportedArity`] if no arity (or 0) was set.
    /// - [`MemoError::InvalidArgument`] if no capacity was set, or it is 0.
    pub fn build_lru<K, V, F>(self, func: F) -> Result<LruMemo<K, V, F>, MemoError>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&[K]) -> V,
    {
        self.lru(func)
    }

    /// Bounded counterpart of [`build_fallible`](Self::build_fallible).
    pub fn build_lru_fallible<K, V, E, F>(self, func: F) -> Result<LruMemo<K, V, F>, MemoError>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&[K]) -> Result<V, E>,
    {
        self.lru(func)
    }

    fn unbounded<K, V, F>(self, func: F) -> Result<UnboundedMemo<K, V, F>, MemoError>
    where
        K: Eq + Hash + Clone,
    {
        let store = UnboundedCache::try_with_reserve(self.checked_arity()?, self.reserve)?;
        Ok(Memoized::new(store, func))
    }

    fn lru<K, V, F>(self, func: F) -> Result<LruMemo<K, V, F>, MemoError>
    where
        K: Eq + Hash + Clone,
    {
        let arity = self.checked_arity()?;
        let capacity = self.checked_capacity()?;
        let store = LruTrieCache::try_with_reserve(arity, capacity, self.reserve)?;
        Ok(Memoized::new(store, func))
    }
}

/// A function paired with the store that caches its results.
///
/// `call` looks the argument tuple up and only invokes the function on a
/// miss. The function must be deterministic for the cache to be sound; the
/// wrapper cannot check that.
pub struct Memoized<S, F> {
    store: S,
    func: F,
}

impl<S, F> Memoized<S, F>
where
    S: MemoStore,
{
    /// Wraps `func` with an existing store.
    pub fn new(store: S, func: F) -> Self {
        Self { store, func }
    }

    /// Read access to the backing store for introspection.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Splits the memoizer into its store and function.
    pub fn into_parts(self) -> (S, F) {
        (self.store, self.func)
    }

    /// Returns the cached result for `args`, invoking the function on a miss.
    ///
    /// # Errors
    ///
    /// [`MemoError::ArityMismatch`] if `args` does not have exactly
    /// `arity` components. The function is not invoked in that case.
    pub fn call(&mut self, args: &[S::Key]) -> Result<&S::Value, MemoError>
    where
        F: FnMut(&[S::Key]) -> S::Value,
    {
        let func = &mut self.func;
        self.store.get_or_insert_with(args, |args| func(args))
    }

    /// Like [`call`](Self::call) for a fallible function. Errors are returned
    /// as-is and never cached.
    pub fn try_call<E>(&mut self, args: &[S::Key]) -> Result<&S::Value, E>
    where
        E: From<MemoError>,
        F: FnMut(&[S::Key]) -> Result<S::Value, E>,
    {
        let func = &mut self.func;
        self.store.get_or_try_insert_with(args, |args| func(args))
    }
}

impl<S, F> fmt::Debug for Memoized<S, F>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

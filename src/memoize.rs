//! Shorthand constructors.
//!
//! [`memoize`] and [`memoize_with_limit`] take the arity explicitly and wrap
//! a slice-taking function. The typed forms ([`unary`], [`binary`],
//! [`ternary`] and their `_with_limit` variants) read the arity off the
//! closure signature instead, so it can never disagree with the function.
//!
//! ```rust
//! use memokit::memoize::{binary, memoize_with_limit};
//!
//! let mut gcd = binary(|a: &u64, b: &u64| {
//!     let (mut a, mut b) = (*a, *b);
//!     while b != 0 {
//!         (a, b) = (b, a % b);
//!     }
//!     a
//! });
//! assert_eq!(gcd.call(&[12, 18]), Ok(&6));
//!
//! let mut len = memoize_with_limit(1, 64, |args: &[&str]| args[0].len()).unwrap();
//! assert_eq!(len.call(&["memo"]), Ok(&4));
//! ```

use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::builder::{LruMemo, MemoBuilder, Memoized, UnboundedMemo};
use crate::error::MemoError;
use crate::policy::lru::LruTrieCache;
use crate::policy::unbounded::UnboundedCache;

/// Memoizes `func` over keys of `arity` components without a size bound.
///
/// # Errors
///
/// [`MemoError::UnsupportedArity`] if `arity` is 0.
pub fn memoize<K, V, F>(arity: usize, func: F) -> Result<UnboundedMemo<K, V, F>, MemoError>
where
    K: Eq + Hash + Clone,
    F: FnMut(&[K]) -> V,
{
    MemoBuilder::new().arity(arity).build(func)
}

/// Memoizes `func`, keeping only the `capacity` most recently used results.
///
/// # Errors
///
/// - [`MemoError::UnsupportedArity`] if `arity` is 0.
/// - [`MemoError::InvalidArgument`] if `capacity` is 0.
pub fn memoize_with_limit<K, V, F>(
    arity: usize,
    capacity: usize,
    func: F,
) -> Result<LruMemo<K, V, F>, MemoError>
where
    K: Eq + Hash + Clone,
    F: FnMut(&[K]) -> V,
{
    MemoBuilder::new()
        .arity(arity)
        .capacity(capacity)
        .build_lru(func)
}

const fn arity_of(components: usize) -> NonZeroUsize {
    NonZeroUsize::MIN.saturating_add(components - 1)
}

/// Memoizes a one-argument function.
pub fn unary<K, V, G>(mut func: G) -> UnboundedMemo<K, V, impl FnMut(&[K]) -> V>
where
    K: Eq + Hash + Clone,
    G: FnMut(&K) -> V,
{
    Memoized::new(UnboundedCache::new(arity_of(1)), move |args: &[K]| {
        func(&args[0])
    })
}

/// Memoizes a two-argument function.
pub fn binary<K, V, G>(mut func: G) -> UnboundedMemo<K, V, impl FnMut(&[K]) -> V>
where
    K: Eq + Hash + Clone,
    G: FnMut(&K, &K) -> V,
{
    Memoized::new(UnboundedCache::new(arity_of(2)), move |args: &[K]| {
        func(&args[0], &args[1])
    })
}

/// Memoizes a three-argument function.
pub fn ternary<K, V, G>(mut func: G) -> UnboundedMemo<K, V, impl FnMut(&[K]) -> V>
where
    K: Eq + Hash + Clone,
    G: FnMut(&K, &K, &K) -> V,
{
    Memoized::new(UnboundedCache::new(arity_of(3)), move |args: &[K]| {
        func(&args[0], &args[1], &args[2])
    })
}

/// Bounded form of [`unary`].
///
/// # Errors
///
/// [`MemoError::InvalidArgument`] if `capacity` is 0.
pub fn unary_with_limit<K, V, G>(
    capacity: usize,
    mut func: G,
) -> Result<LruMemo<K, V, impl FnMut(&[K]) -> V>, MemoError>
where
    K: Eq + Hash + Clone,
    G: FnMut(&K) -> V,
{
    let store = LruTrieCache::try_new(1, capacity)?;
    Ok(Memoized::new(store, move |args: &[K]| func(&args[0])))
}

/// Bounded form of [`binary`].
pub fn binary_with_limit<K, V, G>(
    capacity: usize,
    mut func: G,
) -> Result<LruMemo<K, V, impl FnMut(&[K]) -> V>, MemoError>
where
    K: Eq + Hash + Clone,
    G: FnMut(&K, &K) -> V,
{
    let store = LruTrieCache::try_new(2, capacity)?;
    Ok(Memoized::new(store, move |args: &[K]| {
        func(&args[0], &args[1])
    }))
}

/// Bounded form of [`ternary`].
pub fn ternary_with_limit<K, V, G>(
    capacity: usize,
    mut func: G,
) -> Result<LruMemo<K, V, impl FnMut(&[K]) -> V>, MemoError>
where
    K: Eq + Hash + Clone,
    G: FnMut(&K, &K, &K) -> V,
{
    let store = LruTrieCache::try_new(3, capacity)?;
    Ok(Memoized::new(store, move |args: &[K]| {
        func(&args[0], &args[1], &args[2])
    }))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::traits::MemoStore;

    #[test]
    fn memoize_rejects_zero_arity() {
        let err = memoize(0, |args: &[u8]| args.len()).unwrap_err();
        assert_eq!(err, MemoError::UnsupportedArity);
    }

    #[test]
    fn memoize_with_limit_rejects_zero_capacity() {
        let err = memoize_with_limit(1, 0, |args: &[u8]| args.len()).unwrap_err();
        assert!(matches!(err, MemoError::InvalidArgument(_)));
    }

    #[test]
    fn typed_constructors_fix_the_arity() {
        assert_eq!(unary(|a: &u8| *a).store().arity(), 1);
        assert_eq!(binary(|a: &u8, b: &u8| a + b).store().arity(), 2);
        assert_eq!(ternary(|a: &u8, b: &u8, c: &u8| a + b + c).store().arity(), 3);
    }

    #[test]
    fn ternary_caches_positional_tuples() {
        let calls = Cell::new(0);
        let mut volume = ternary(|w: &u32, h: &u32, d: &u32| {
            calls.set(calls.get() + 1);
            w * h * d
        });
        assert_eq!(volume.call(&[2, 3, 4]), Ok(&24));
        assert_eq!(volume.call(&[4, 3, 2]), Ok(&24));
        assert_eq!(volume.call(&[2, 3, 4]), Ok(&24));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn unary_with_limit_evicts_least_recent() {
        let calls = Cell::new(0);
        let mut square = unary_with_limit(2, |x: &i64| {
            calls.set(calls.get() + 1);
            x * x
        })
        .unwrap();

        for x in [1, 2, 1, 3] {
            assert_eq!(square.call(&[x]), Ok(&(x * x)));
        }
        assert_eq!(calls.get(), 3);
        assert!(!square.store().contains(&[2]));

        square.call(&[2]).unwrap();
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn binary_with_limit_keeps_capacity() {
        let mut pair = binary_with_limit(3, |a: &u16, b: &u16| (*a, *b)).unwrap();
        for a in 0..4u16 {
            for b in 0..4u16 {
                assert_eq!(pair.call(&[a, b]), Ok(&(a, b)));
            }
        }
        assert_eq!(pair.store().len(), 3);
        assert!(pair.store().check_invariants().is_ok());
    }

    #[test]
    fn ternary_with_limit_rejects_zero_capacity() {
        let err = ternary_with_limit(0, |a: &u8, _: &u8, _: &u8| *a).unwrap_err();
        assert!(matches!(err, MemoError::InvalidArgument(_)));
    }
}

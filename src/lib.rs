//! memokit: memoization caches keyed by fixed-arity argument tuples.
//!
//! A memoizer wraps a deterministic function of N arguments and reuses the
//! result computed for an argument tuple it has seen before. Tuples are
//! indexed by a trie with one level per argument position. The bounded
//! variant adds an arena-backed recency list for O(1) LRU eviction and prunes
//! trie branches that eviction leaves empty.
//!
//! ```rust
//! use memokit::prelude::*;
//!
//! let mut fib_pair = memoize_with_limit(2, 1024, |args: &[u64]| args[0] + args[1]).unwrap();
//! assert_eq!(fib_pair.call(&[3, 5]), Ok(&8));
//! assert!(fib_pair.store().contains(&[3, 5]));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod key;
pub mod memoize;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`MemoError`]: Returned when a memoizer is configured with invalid
//!   parameters (missing capacity, unknown arity) or called with the wrong
//!   number of arguments.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use memokit::builder::MemoBuilder;
//! use memokit::error::MemoError;
//!
//! // The bounded variant needs a capacity
//! let err = MemoBuilder::new()
//!     .arity(1)
//!     .build_lru(|args: &[u32]| args[0] * 2)
//!     .unwrap_err();
//! assert!(matches!(err, MemoError::InvalidArgument(_)));
//!
//! // Calls must supply exactly `arity` components
//! let mut double = MemoBuilder::new()
//!     .arity(1)
//!     .build(|args: &[u32]| args[0] * 2)
//!     .unwrap();
//! assert_eq!(double.call(&[21]), Ok(&42));
//! assert_eq!(
//!     double.call(&[1, 2]),
//!     Err(MemoError::ArityMismatch { expected: 1, actual: 2 })
//! );
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// MemoError
// ---------------------------------------------------------------------------

/// Error returned by memoizer construction and invocation.
///
/// All configuration problems are reported at construction time. The only
/// call-time error is [`MemoError::ArityMismatch`]; failures of the wrapped
/// function itself are never wrapped in this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoError {
    /// A construction parameter is missing or out of range, e.g. a bounded
    /// cache without a capacity or with capacity 0.
    InvalidArgument(String),
    /// The number of key components is unknown or zero.
    UnsupportedArity,
    /// A call supplied a different number of components than the fixed arity.
    ArityMismatch { expected: usize, actual: usize },
}

impl MemoError {
    /// Creates an [`MemoError::InvalidArgument`] with the given description.
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Validates a call's argument count against the fixed arity.
    #[inline]
    pub(crate) fn check_arity(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::ArityMismatch { expected, actual })
        }
    }
}

impl fmt::Display for MemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::UnsupportedArity => {
                f.write_str("unsupported arity: the number of key components must be known and at least 1")
            },
            Self::ArityMismatch { expected, actual } => write!(
                f,
                "arity mismatch: expected {expected} argument(s), got {actual}"
            ),
        }
    }
}

impl std::error::Error for MemoError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on the arena and the cache types
/// (e.g. [`LruTrieCache::check_invariants`](crate::policy::lru::LruTrieCache::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

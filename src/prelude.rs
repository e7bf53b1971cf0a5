pub use crate::builder::{LruMemo, MemoBuilder, Memoized, UnboundedMemo};
pub use crate::ds::{KeyTrie, SlotArena, SlotId};
pub use crate::error::{InvariantError, MemoError};
pub use crate::key::ByAddress;
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    MemoMetricsSnapshot, MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter,
};
pub use crate::memoize::{
    binary, binary_with_limit, memoize, memoize_with_limit, ternary, ternary_with_limit, unary,
    unary_with_limit,
};
pub use crate::policy::lru::LruTrieCache;
pub use crate::policy::unbounded::UnboundedCache;
pub use crate::traits::MemoStore;

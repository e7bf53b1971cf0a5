//! Memo store implementations.
//!
//! | Store                      | Bound      | Eviction | Trie leaf holds |
//! |----------------------------|------------|----------|-----------------|
//! | [`UnboundedCache`]         | none       | never    | value           |
//! | [`LruTrieCache`]           | `capacity` | LRU      | [`SlotId`]      |
//!
//! [`UnboundedCache`]: unbounded::UnboundedCache
//! [`LruTrieCache`]: lru::LruTrieCache
//! [`SlotId`]: crate::ds::SlotId

pub mod lru;
pub mod unbounded;

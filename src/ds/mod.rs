pub mod key_trie;
pub mod slot_arena;

pub use key_trie::{KeyTrie, TrieNode};
pub use slot_arena::{Allocation, SlotArena, SlotId};

//! Trie over the positional components of a fixed-arity key tuple.
//!
//! A key `[k0, k1, .., kN-1]` is resolved by walking `N - 1` internal levels,
//! one per leading component, and looking up the last component in a leaf
//! map. Internal levels are created lazily the first time a prefix is seen and
//! pruned again by [`KeyTrie::remove_cascading`] once they hold nothing.
//!
//! ```text
//!   arity = 3, keys (1,2,3) (1,2,4) (1,5,6)
//!
//!   root: Internal ─┬─ 1 ─► Internal ─┬─ 2 ─► Leaf { 3 ─► h, 4 ─► h }
//!                   │                 └─ 5 ─► Leaf { 6 ─► h }
//!
//!   remove_cascading(1,5,6):
//!     Leaf{6} becomes empty ─► entry 5 removed from its parent
//!     parent still holds 2  ─► entry 1 kept
//! ```
//!
//! Arity 1 collapses to a single leaf root. Only leaf entries carry handles;
//! the handle type `H` is the cached value for the unbounded variant and a
//! [`SlotId`](crate::ds::SlotId) for the bounded one.

use std::collections::hash_map::Entry;
use std::collections::TryReserveError;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// One trie level: either further levels keyed by a component, or the leaf
/// map holding handles.
#[derive(Debug)]
pub enum TrieNode<K, H> {
    Internal(FxHashMap<K, TrieNode<K, H>>),
    Leaf(FxHashMap<K, H>),
}

impl<K, H> TrieNode<K, H> {
    fn empty(leaf: bool) -> Self {
        if leaf {
            TrieNode::Leaf(FxHashMap::default())
        } else {
            TrieNode::Internal(FxHashMap::default())
        }
    }

    /// Returns `true` if this level has no children or handles.
    pub fn is_empty(&self) -> bool {
        match self {
            TrieNode::Internal(children) => children.is_empty(),
            TrieNode::Leaf(handles) => handles.is_empty(),
        }
    }
}

/// Key-tuple index of fixed depth.
#[derive(Debug)]
pub struct KeyTrie<K, H> {
    root: TrieNode<K, H>,
    arity: usize,
}

impl<K, H> KeyTrie<K, H>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty trie for keys of `arity` components.
    ///
    /// Callers validate `arity >= 1`; an arity of 0 is treated as 1.
    pub fn new(arity: usize) -> Self {
        let arity = arity.max(1);
        Self {
            root: TrieNode::empty(arity == 1),
            arity,
        }
    }

    /// Like [`new`](Self::new), pre-sizing the root level for `capacity`
    /// distinct first components.
    pub fn try_with_root_capacity(arity: usize, capacity: usize) -> Result<Self, TryReserveError> {
        let mut trie = Self::new(arity);
        match &mut trie.root {
            TrieNode::Internal(children) => children.try_reserve(capacity)?,
            TrieNode::Leaf(handles) => handles.try_reserve(capacity)?,
        }
        Ok(trie)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns `true` if no key is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Looks up the handle stored for `key` without creating any level.
    pub fn get(&self, key: &[K]) -> Option<&H> {
        if key.len() != self.arity {
            return None;
        }
        let (last, prefix) = key.split_last()?;
        let mut node = &self.root;
        for component in prefix {
            node = match node {
                TrieNode::Internal(children) => children.get(component)?,
                TrieNode::Leaf(_) => return None,
            };
        }
        match node {
            TrieNode::Leaf(handles) => handles.get(last),
            TrieNode::Internal(_) => None,
        }
    }

    /// Returns `true` if at least one stored key starts with `prefix`.
    ///
    /// An empty prefix asks whether the trie holds anything at all.
    pub fn contains_prefix(&self, prefix: &[K]) -> bool {
        if prefix.len() > self.arity {
            return false;
        }
        let mut node = &self.root;
        for (depth, component) in prefix.iter().enumerate() {
            match node {
                TrieNode::Internal(children) => match children.get(component) {
                    Some(child) => node = child,
                    None => return false,
                },
                TrieNode::Leaf(handles) => {
                    return depth + 1 == prefix.len() && handles.contains_key(component);
                },
            }
        }
        !node.is_empty()
    }

    /// Resolves the leaf map for `key`, creating missing internal levels.
    ///
    /// Only the first `arity - 1` components are used. `key` must hold exactly
    /// `arity` components.
    fn leaf_mut(&mut self, key: &[K]) -> &mut FxHashMap<K, H> {
        debug_assert_eq!(key.len(), self.arity);
        let leaf_depth = self.arity - 1;
        let prefix = &key[..key.len().saturating_sub(1)];
        let mut node = &mut self.root;
        for (depth, component) in prefix.iter().enumerate() {
            node = match node {
                TrieNode::Internal(children) => children
                    .entry(component.clone())
                    .or_insert_with(|| TrieNode::empty(depth + 1 == leaf_depth)),
                TrieNode::Leaf(_) => unreachable!("leaf above depth {leaf_depth}"),
            };
        }
        match node {
            TrieNode::Leaf(handles) => handles,
            TrieNode::Internal(_) => unreachable!("internal level at leaf depth {leaf_depth}"),
        }
    }

    /// Stores `handle` under `key`, returning the handle it replaced.
    ///
    /// A key whose length differs from the arity is ignored and yields `None`.
    pub fn insert(&mut self, key: &[K], handle: H) -> Option<H> {
        if key.len() != self.arity {
            return None;
        }
        let last = key[self.arity - 1].clone();
        self.leaf_mut(key).insert(last, handle)
    }

    /// Stores `handle` under `key` and returns a reference to it.
    ///
    /// `None` (and nothing stored) when the key length differs from the arity.
    pub fn insert_and_get(&mut self, key: &[K], handle: H) -> Option<&mut H> {
        if key.len() != self.arity {
            return None;
        }
        let last = key[self.arity - 1].clone();
        let slot = match self.leaf_mut(key).entry(last) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(handle);
                occupied.into_mut()
            },
            Entry::Vacant(vacant) => vacant.insert(handle),
        };
        Some(slot)
    }

    /// Removes `key` and prunes every ancestor level left empty by it.
    ///
    /// Returns the removed handle and the number of internal entries pruned.
    /// Ancestors that still have other children are kept.
    pub fn remove_cascading(&mut self, key: &[K]) -> Option<(H, usize)> {
        if key.len() != self.arity {
            return None;
        }
        let mut pruned = 0;
        let handle = remove_in(&mut self.root, key, &mut pruned)?;
        Some((handle, pruned))
    }

    /// Number of stored keys. O(n) over the trie.
    pub fn count(&self) -> usize {
        fn count_in<K, H>(node: &TrieNode<K, H>) -> usize {
            match node {
                TrieNode::Internal(children) => children.values().map(count_in).sum(),
                TrieNode::Leaf(handles) => handles.len(),
            }
        }
        count_in(&self.root)
    }

    /// Visits every `(key, handle)` pair in unspecified order.
    pub fn for_each(&self, mut visit: impl FnMut(&[K], &H)) {
        fn walk<K: Clone, H>(
            node: &TrieNode<K, H>,
            path: &mut Vec<K>,
            visit: &mut dyn FnMut(&[K], &H),
        ) {
            match node {
                TrieNode::Internal(children) => {
                    for (component, child) in children {
                        path.push(component.clone());
                        walk(child, path, visit);
                        path.pop();
                    }
                },
                TrieNode::Leaf(handles) => {
                    for (component, handle) in handles {
                        path.push(component.clone());
                        visit(path.as_slice(), handle);
                        path.pop();
                    }
                },
            }
        }
        let mut path = Vec::with_capacity(self.arity);
        walk(&self.root, &mut path, &mut visit);
    }
}

fn remove_in<K, H>(node: &mut TrieNode<K, H>, key: &[K], pruned: &mut usize) -> Option<H>
where
    K: Eq + Hash,
{
    let (head, rest) = key.split_first()?;
    match node {
        TrieNode::Leaf(handles) => handles.remove(head),
        TrieNode::Internal(children) => {
            let child = children.get_mut(head)?;
            let removed = remove_in(child, rest, pruned);
            if child.is_empty() {
                children.remove(head);
                *pruned += 1;
            }
            removed
        },
    }
}

//! Fixed-capacity slot arena with an embedded recency list.
//!
//! Two sentinel slots (index 0 and `capacity + 1`) bound a circular
//! doubly-linked list threaded through every slot, so linking never branches
//! on an empty list. A detached slot is self-linked.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{InvariantError, MemoError};

/// Stable handle to an arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Sentinel bounding the least-recently-touched end of the list.
    pub const LRU_SENTINEL: SlotId = SlotId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Result of [`SlotArena::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// A never-used slot handed out while the arena is still growing.
    Fresh(SlotId),
    /// The least-recently-touched slot, unlinked and ready for reuse. Its
    /// previous payload is still in place until the caller replaces it.
    Recycled(SlotId),
}

impl Allocation {
    pub fn slot(self) -> SlotId {
        match self {
            Allocation::Fresh(id) | Allocation::Recycled(id) => id,
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    payload: Option<T>,
    prev: usize,
    next: usize,
}

/// Arena of `capacity` real slots plus two sentinels.
///
/// `len` grows monotonically from 0 to `capacity`; after that every
/// allocation recycles the least-recently-touched slot in place.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    len: usize,
    capacity: usize,
}

impl<T> SlotArena<T> {
    /// Creates an arena with `capacity` real slots.
    ///
    /// Slots are reserved up front but only linked on first allocation.
    /// Fails with [`MemoError::InvalidArgument`] when the slots plus the two
    /// sentinels cannot be allocated. A capacity of 0 yields an arena whose
    /// every allocation fails; callers validate capacity before constructing
    /// one.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, MemoError> {
        let total = capacity.checked_add(2).ok_or_else(|| {
            MemoError::invalid_argument(format!(
                "capacity {capacity} leaves no room for sentinel slots"
            ))
        })?;
        let mut slots = Vec::new();
        slots.try_reserve_exact(total).map_err(|err| {
            MemoError::invalid_argument(format!("cannot allocate {capacity} slots: {err}"))
        })?;
        let mru = capacity + 1;
        slots.push(Slot {
            payload: None,
            prev: mru,
            next: mru,
        });
        for idx in 1..=capacity {
            slots.push(Slot {
                payload: None,
                prev: idx,
                next: idx,
            });
        }
        slots.push(Slot {
            payload: None,
            prev: 0,
            next: 0,
        });
        Ok(Self {
            slots,
            len: 0,
            capacity,
        })
    }

    /// Sentinel bounding the most-recently-touched end of the list.
    #[inline]
    pub fn mru_sentinel(&self) -> SlotId {
        SlotId(self.capacity + 1)
    }

    /// Hands out a slot for a new entry.
    ///
    /// The returned slot is detached from the recency list; call
    /// [`touch`](Self::touch) once its payload is in place. Returns `None`
    /// only for a zero-capacity arena.
    pub fn allocate(&mut self) -> Option<Allocation> {
        if self.len < self.capacity {
            self.len += 1;
            return Some(Allocation::Fresh(SlotId(self.len)));
        }
        let evictee = self.slots[0].next;
        if evictee == self.capacity + 1 {
            return None;
        }
        self.unlink(evictee);
        Some(Allocation::Recycled(SlotId(evictee)))
    }

    /// Moves `id` to the most-recently-touched end of the list.
    #[inline]
    pub fn touch(&mut self, id: SlotId) {
        debug_assert!(self.is_real(id), "touch on sentinel or out-of-range {id}");
        self.unlink(id.0);
        self.link_before_mru(id.0);
    }

    /// Returns the least-recently-touched live slot.
    #[inline]
    pub fn lru(&self) -> Option<SlotId> {
        let first = self.slots[0].next;
        (first != self.capacity + 1).then_some(SlotId(first))
    }

    /// Returns the most-recently-touched live slot.
    #[inline]
    pub fn mru(&self) -> Option<SlotId> {
        let last = self.slots[self.capacity + 1].prev;
        (last != 0).then_some(SlotId(last))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.payload.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.payload.as_mut())
    }

    /// Stores `payload` in a real slot, returning what it held before.
    pub fn replace(&mut self, id: SlotId, payload: T) -> Option<T> {
        debug_assert!(self.is_real(id), "replace on sentinel or out-of-range {id}");
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.payload.replace(payload))
    }

    /// Number of slots handed out so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Iterates linked slots from least to most recently touched.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: self,
            cursor: self.slots[0].next,
        }
    }

    /// Verifies the recency chain against `len` and the sentinel layout.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mru = self.capacity + 1;
        if self.slots.len() != self.capacity + 2 {
            return Err(InvariantError::new(format!(
                "arena holds {} slots, expected {}",
                self.slots.len(),
                self.capacity + 2
            )));
        }
        if self.len > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.len, self.capacity
            )));
        }

        let mut count = 0usize;
        let mut prev = 0usize;
        let mut cursor = self.slots[0].next;
        while cursor != mru {
            if cursor == 0 || cursor > self.len {
                return Err(InvariantError::new(format!(
                    "recency chain reaches slot#{cursor} outside 1..={}",
                    self.len
                )));
            }
            if self.slots[cursor].prev != prev {
                return Err(InvariantError::new(format!(
                    "slot#{cursor} prev is slot#{}, expected slot#{prev}",
                    self.slots[cursor].prev
                )));
            }
            if self.slots[cursor].payload.is_none() {
                return Err(InvariantError::new(format!(
                    "linked slot#{cursor} holds no entry"
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("cycle detected in recency chain"));
            }
            prev = cursor;
            cursor = self.slots[cursor].next;
        }
        if self.slots[mru].prev != prev {
            return Err(InvariantError::new(format!(
                "MRU sentinel prev is slot#{}, expected slot#{prev}",
                self.slots[mru].prev
            )));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "recency chain holds {count} slots, len is {}",
                self.len
            )));
        }
        Ok(())
    }

    #[inline]
    fn is_real(&self, id: SlotId) -> bool {
        id.0 >= 1 && id.0 <= self.capacity
    }

    #[inline(always)]
    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
        self.slots[idx].prev = idx;
        self.slots[idx].next = idx;
    }

    #[inline(always)]
    fn link_before_mru(&mut self, idx: usize) {
        let mru = self.capacity + 1;
        let last = self.slots[mru].prev;
        self.slots[idx].prev = last;
        self.slots[idx].next = mru;
        self.slots[last].next = idx;
        self.slots[mru].prev = idx;
    }
}

impl<T> Index<SlotId> for SlotArena<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `id` is a sentinel or a slot that was never filled.
    fn index(&self, id: SlotId) -> &T {
        match self.get(id) {
            Some(payload) => payload,
            None => panic!("{id} holds no entry"),
        }
    }
}

impl<T> IndexMut<SlotId> for SlotArena<T> {
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        match self.get_mut(id) {
            Some(payload) => payload,
            None => panic!("{id} holds no entry"),
        }
    }
}

/// Iterator over linked slots, least recently touched first.
pub struct Iter<'a, T> {
    arena: &'a SlotArena<T>,
    cursor: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor != self.arena.capacity + 1 {
            let idx = self.cursor;
            let slot = &self.arena.slots[idx];
            self.cursor = slot.next;
            if let Some(payload) = slot.payload.as_ref() {
                return Some((SlotId(idx), payload));
            }
        }
        None
    }
}

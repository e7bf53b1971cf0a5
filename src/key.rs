//! Key component wrappers.
//!
//! Trie levels compare key components with their own `Eq`/`Hash`. For shared
//! structured values that is usually *structural* equality, which is not
//! always what a memoized function wants: two separately built values with
//! equal contents may stand for different objects. [`ByAddress`] switches a
//! component to reference identity.
//!
//! ```
//! use std::rc::Rc;
//! use memokit::key::ByAddress;
//!
//! let a = Rc::new(vec![1, 2, 3]);
//! let b = Rc::new(vec![1, 2, 3]);
//!
//! assert_eq!(ByAddress(Rc::clone(&a)), ByAddress(Rc::clone(&a)));
//! assert_ne!(ByAddress(a), ByAddress(b));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

/// Compares and hashes a pointer-like value by the address it points to.
///
/// Works with any `P: Deref`, e.g. `Rc<T>`, `Arc<T>`, `Box<T>` or `&T`. The
/// pointee's own `Eq`/`Hash` implementations are never consulted.
#[derive(Clone, Copy, Default)]
pub struct ByAddress<P>(pub P);

impl<P> ByAddress<P>
where
    P: Deref,
{
    #[inline]
    fn addr(&self) -> *const () {
        let target: &P::Target = &self.0;
        target as *const P::Target as *const ()
    }

    /// Unwraps the inner pointer.
    #[inline]
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: Deref> PartialEq for ByAddress<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<P: Deref> Eq for ByAddress<P> {}

impl<P: Deref> Hash for ByAddress<P> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<P: Deref> Deref for ByAddress<P> {
    type Target = P::Target;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<P> From<P> for ByAddress<P> {
    fn from(ptr: P) -> Self {
        ByAddress(ptr)
    }
}

impl<P: Deref> fmt::Debug for ByAddress<P>
where
    P::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByAddress")
            .field(&self.addr())
            .field(&&**self)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn clones_of_same_rc_are_equal() {
        let p = Rc::new(Point { x: 1, y: 2 });
        assert_eq!(ByAddress(Rc::clone(&p)), ByAddress(p));
    }

    #[test]
    fn equal_contents_in_distinct_allocations_differ() {
        let a = Arc::new(Point { x: 1, y: 2 });
        let b = Arc::new(Point { x: 1, y: 2 });
        assert_eq!(*a, *b);
        assert_ne!(ByAddress(a), ByAddress(b));
    }

    #[test]
    fn hash_follows_identity() {
        let a = Rc::new(Point { x: 0, y: 0 });
        let b = Rc::new(Point { x: 0, y: 0 });
        let mut set = HashSet::new();
        set.insert(ByAddress(Rc::clone(&a)));
        set.insert(ByAddress(Rc::clone(&a)));
        set.insert(ByAddress(b));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn plain_references_compare_by_address() {
        let values = [Point { x: 3, y: 3 }, Point { x: 3, y: 3 }];
        assert_eq!(ByAddress(&values[0]), ByAddress(&values[0]));
        assert_ne!(ByAddress(&values[0]), ByAddress(&values[1]));
    }

    #[test]
    fn deref_reaches_pointee() {
        let key = ByAddress(Rc::new(Point { x: 4, y: 5 }));
        assert_eq!(key.x + key.y, 9);
        assert_eq!(key.into_inner().x, 4);
    }
}

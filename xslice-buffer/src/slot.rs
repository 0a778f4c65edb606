use crate::store::Store;
use crate::view::View;
use std::fmt;
use std::rc::Rc;
use xslice_common::byte_repr::ByteRepr;

/// Slot is a handle to one element position of one store.
///
/// It keeps the store alive on its own. A view that reallocates on
/// append does not take its slots along: they keep reading and writing
/// the old store, which is no longer part of that view.
pub struct Slot<T> {
    store: Rc<Store<T>>,
    pos: usize,
}

impl<T> Clone for Slot<T> {
    #[inline]
    fn clone(&self) -> Self {
        Slot {
            store: Rc::clone(&self.store),
            pos: self.pos,
        }
    }
}

impl<T: ByteRepr> Slot<T> {
    #[inline]
    pub(crate) fn new(store: Rc<Store<T>>, pos: usize) -> Self {
        debug_assert!(pos < store.size());
        Slot { store, pos }
    }

    /// Returns position within the store.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn get(&self) -> T {
        self.store.get(self.pos)
    }

    #[inline]
    pub fn set(&self, val: T) {
        self.store.set(self.pos, val)
    }

    /// Returns whether the slot is one of the live elements of given view.
    #[inline]
    pub fn is_live_in(&self, view: &View<T>) -> bool {
        match view.store() {
            Some(store) => {
                Rc::ptr_eq(store, &self.store)
                    && self.pos >= view.offset()
                    && self.pos < view.offset() + view.len()
            }
            None => false,
        }
    }
}

impl<T: ByteRepr + fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("store", &self.store.id())
            .field("pos", &self.pos)
            .field("val", &self.get())
            .finish()
    }
}

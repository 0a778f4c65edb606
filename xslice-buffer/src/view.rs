use crate::error::{Error, Result};
use crate::grow::GrowPolicy;
use crate::slot::Slot;
use crate::store::Store;
use std::fmt;
use std::io;
use std::rc::Rc;
use xslice_common::byte_repr::ByteRepr;

/// View is a window `(store, offset, length, capacity)` into a store.
///
/// Cloning a view copies the window, not the elements, so the clone and
/// the original alias the same store. Appending writes into spare
/// capacity of the shared store when there is any, and moves to a new
/// store grown by the view's [`GrowPolicy`] otherwise. In the latter case
/// the old store is left untouched for every other view still using it.
///
/// Views are not `Send`: mutation of a shared store is only defined on a
/// single thread.
pub struct View<T> {
    store: Option<Rc<Store<T>>>,
    offset: usize,
    len: usize,
    cap: usize,
    policy: GrowPolicy,
}

impl<T> Clone for View<T> {
    #[inline]
    fn clone(&self) -> Self {
        View {
            store: self.store.clone(),
            offset: self.offset,
            len: self.len,
            cap: self.cap,
            policy: self.policy,
        }
    }
}

impl<T: ByteRepr> Default for View<T> {
    #[inline]
    fn default() -> Self {
        View::new()
    }
}

impl<T: ByteRepr> View<T> {
    /// Create an empty view without backing store.
    #[inline]
    pub fn new() -> Self {
        View {
            store: None,
            offset: 0,
            len: 0,
            cap: 0,
            policy: GrowPolicy::default(),
        }
    }

    /// Create a view of `len` zero elements.
    #[inline]
    pub fn with_len(len: usize) -> Result<Self> {
        View::with_len_cap(len, len)
    }

    /// Create a view of `len` zero elements over a store of `cap` elements.
    #[inline]
    pub fn with_len_cap(len: usize, cap: usize) -> Result<Self> {
        if cap < len {
            return Err(Error::CapacityLessThanLength { len, cap });
        }
        let store = Store::new(cap)?;
        Ok(View {
            store: Some(Rc::new(store)),
            offset: 0,
            len,
            cap,
            policy: GrowPolicy::default(),
        })
    }

    /// Create a view holding a copy of given values, with capacity equal
    /// to length.
    #[inline]
    pub fn from_slice(vals: &[T]) -> Result<Self> {
        let view = View::with_len(vals.len())?;
        if let Some(store) = &view.store {
            for (i, v) in vals.iter().enumerate() {
                store.set(i, *v);
            }
        }
        Ok(view)
    }

    /// Create a view from native-endian bytes of its elements.
    pub fn from_bytes(bs: &[u8]) -> Result<Self> {
        let width = T::width();
        if width == 0 {
            return Err(Error::InvalidFormat(
                "zero-sized element has no byte representation".to_string(),
            ));
        }
        if bs.len() % width != 0 {
            return Err(Error::InvalidFormat(format!(
                "byte length {} is not multiple of element width {}",
                bs.len(),
                width
            )));
        }
        let view = View::with_len(bs.len() / width)?;
        if let Some(store) = &view.store {
            for (i, chk) in bs.chunks_exact(width).enumerate() {
                store.set(i, T::from_bytes(chk)?);
            }
        }
        Ok(view)
    }

    /// Replace growth policy of this view. Views derived from it inherit
    /// the policy.
    #[inline]
    pub fn with_policy(mut self, policy: GrowPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn policy(&self) -> GrowPolicy {
        self.policy
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns start position of the view within its store.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns whether the view has no backing store at all.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.store.is_none()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Result<T> {
        let store = self.checked_store(idx)?;
        Ok(store.get(self.offset + idx))
    }

    /// Overwrite element in place. Visible to all views sharing the slot.
    #[inline]
    pub fn set(&self, idx: usize, val: T) -> Result<()> {
        let store = self.checked_store(idx)?;
        store.set(self.offset + idx, val);
        Ok(())
    }

    /// Returns a view of `[lo, hi)` sharing the store, whose capacity
    /// extends to the end of this view's capacity.
    ///
    /// Appending to the returned view overwrites elements of this view
    /// beyond `hi` as long as capacity remains. Use
    /// [`View::sub_view_max`] to limit it.
    #[inline]
    pub fn sub_view(&self, lo: usize, hi: usize) -> Result<Self> {
        self.slice(lo, hi, self.cap)
    }

    /// Returns a view of `[lo, hi)` sharing the store, with capacity
    /// `max - lo`.
    ///
    /// With `max == hi` the first append to the returned view detaches it
    /// to a new store.
    #[inline]
    pub fn sub_view_max(&self, lo: usize, hi: usize, max: usize) -> Result<Self> {
        self.slice(lo, hi, max)
    }

    fn slice(&self, lo: usize, hi: usize, max: usize) -> Result<Self> {
        if lo > hi || hi > max || max > self.cap {
            return Err(Error::SliceOutOfRange {
                lo,
                hi,
                max,
                cap: self.cap,
            });
        }
        Ok(View {
            store: self.store.clone(),
            offset: self.offset + lo,
            len: hi - lo,
            cap: max - lo,
            policy: self.policy,
        })
    }

    /// Returns a view with `val` appended.
    ///
    /// If there is spare capacity, the value is written into the shared
    /// store and the returned view keeps store and capacity. Otherwise a
    /// new store of `policy.grow(cap)` elements is allocated, live elements
    /// are copied into it, and the returned view uses it exclusively.
    pub fn append(&self, val: T) -> Result<Self> {
        if let Some(store) = self.spare_store() {
            store.set(self.offset + self.len, val);
            let mut view = self.clone();
            view.len += 1;
            return Ok(view);
        }
        let mut view = self.realloc(self.policy.grow(self.cap))?;
        if let Some(store) = &view.store {
            store.set(self.len, val);
        }
        view.len += 1;
        Ok(view)
    }

    /// Returns a view with all `vals` appended, reallocating at most once.
    pub fn append_slice(&self, vals: &[T]) -> Result<Self> {
        let needed = self
            .len
            .checked_add(vals.len())
            .ok_or(Error::CapacityOverflow)?;
        let mut view = if needed <= self.cap {
            self.clone()
        } else {
            self.realloc(self.policy.grow_to(self.cap, needed))?
        };
        if let Some(store) = &view.store {
            for (i, v) in vals.iter().enumerate() {
                store.set(view.offset + self.len + i, *v);
            }
        }
        view.len = needed;
        Ok(view)
    }

    /// Returns a view with all elements of `other` appended. `other` may
    /// share store with this view.
    #[inline]
    pub fn append_view(&self, other: &View<T>) -> Result<Self> {
        // read first, appending in place may overwrite other's elements
        let vals = other.to_vec();
        self.append_slice(&vals)
    }

    /// Append in place, replacing this view with the appended one.
    #[inline]
    pub fn push(&mut self, val: T) -> Result<()> {
        *self = self.append(val)?;
        Ok(())
    }

    /// Append slice in place, replacing this view with the appended one.
    #[inline]
    pub fn extend_from_slice(&mut self, vals: &[T]) -> Result<()> {
        *self = self.append_slice(vals)?;
        Ok(())
    }

    /// Copy `min(self.len(), src.len())` elements from `src` into this
    /// view, returning the count. Never reallocates.
    #[inline]
    pub fn copy_from(&self, src: &View<T>) -> usize {
        let n = usize::min(self.len, src.len);
        if let (Some(dst_store), Some(src_store)) = (&self.store, &src.store) {
            dst_store.copy_from(self.offset, src_store, src.offset, n);
        }
        n
    }

    /// Returns copy of live elements.
    #[inline]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { view: self, idx: 0 }
    }

    /// Convert to fixed-length array. Length must equal `N`.
    pub fn to_array<const N: usize>(&self) -> Result<[T; N]> {
        if self.len != N {
            return Err(Error::TypeMismatch {
                expected: N,
                actual: self.len,
            });
        }
        let mut arr = [T::zero(); N];
        for (idx, a) in arr.iter_mut().enumerate() {
            *a = self.get(idx)?;
        }
        Ok(arr)
    }

    /// Overwrite all elements with a fixed-length array. Length must
    /// equal `N`.
    pub fn assign_array<const N: usize>(&self, arr: &[T; N]) -> Result<()> {
        if self.len != N {
            return Err(Error::TypeMismatch {
                expected: self.len,
                actual: N,
            });
        }
        for (idx, v) in arr.iter().enumerate() {
            self.set(idx, *v)?;
        }
        Ok(())
    }

    /// Write live elements as native-endian bytes, returns number of
    /// bytes written.
    #[inline]
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<usize> {
        T::write_all(writer, &self.to_vec())
    }

    /// Returns handle of the element at `idx` in the current store.
    ///
    /// The handle keeps referring to that store after this view moves to
    /// a new one on append, see [`Slot::is_live_in`].
    #[inline]
    pub fn slot(&self, idx: usize) -> Result<Slot<T>> {
        self.checked_store(idx)?;
        match &self.store {
            Some(store) => Ok(Slot::new(Rc::clone(store), self.offset + idx)),
            None => Err(Error::IndexOutOfRange {
                index: idx,
                len: self.len,
            }),
        }
    }

    /// Returns whether both views reference the same store.
    #[inline]
    pub fn same_store(&self, other: &View<T>) -> bool {
        match (&self.store, &other.store) {
            (Some(s1), Some(s2)) => Rc::ptr_eq(s1, s2),
            _ => false,
        }
    }

    /// Returns number of views and slots holding the store.
    #[inline]
    pub fn store_refs(&self) -> usize {
        self.store.as_ref().map_or(0, Rc::strong_count)
    }

    /// Returns identity of the backing store.
    #[inline]
    pub fn store_id(&self) -> Option<usize> {
        self.store.as_ref().map(|s| s.id())
    }

    #[inline]
    pub(crate) fn store(&self) -> Option<&Rc<Store<T>>> {
        self.store.as_ref()
    }

    #[inline]
    fn checked_store(&self, idx: usize) -> Result<&Store<T>> {
        let err = Error::IndexOutOfRange {
            index: idx,
            len: self.len,
        };
        if idx >= self.len {
            return Err(err);
        }
        self.store.as_deref().ok_or(err)
    }

    #[inline]
    fn spare_store(&self) -> Option<&Store<T>> {
        if self.len < self.cap {
            self.store.as_deref()
        } else {
            None
        }
    }

    /// Allocate a new store of `new_cap` elements and copy live elements
    /// into it. Returned view has same length.
    fn realloc(&self, new_cap: usize) -> Result<Self> {
        debug_assert!(new_cap >= self.len);
        let store = Store::new(new_cap)?;
        if let Some(old) = &self.store {
            store.copy_from(0, old, self.offset, self.len);
            if Rc::strong_count(old) > 1 {
                log::trace!(
                    "view detached from shared store: offset={}, len={}",
                    self.offset,
                    self.len
                );
            }
        }
        log::debug!(
            "reallocate view: len={}, cap={} -> {}",
            self.len,
            self.cap,
            new_cap
        );
        Ok(View {
            store: Some(Rc::new(store)),
            offset: 0,
            len: self.len,
            cap: new_cap,
            policy: self.policy,
        })
    }
}

/// Copy `min(dst.len(), src.len())` elements from `src` into `dst`,
/// returns the count.
#[inline]
pub fn copy_into<T: ByteRepr>(dst: &View<T>, src: &View<T>) -> usize {
    dst.copy_from(src)
}

impl<T: ByteRepr + fmt::Debug> fmt::Debug for View<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Elems<'a, T>(&'a View<T>);
        impl<T: ByteRepr + fmt::Debug> fmt::Debug for Elems<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.0.iter()).finish()
            }
        }
        f.debug_struct("View")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("cap", &self.cap)
            .field("elems", &Elems(self))
            .finish()
    }
}

/// Iterator over live elements of a view, yielding copies.
pub struct Iter<'a, T> {
    view: &'a View<T>,
    idx: usize,
}

impl<T: ByteRepr> Iterator for Iter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let v = self.view.get(self.idx).ok()?;
        self.idx += 1;
        Some(v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.view.len - self.idx;
        (n, Some(n))
    }
}

impl<T: ByteRepr> ExactSizeIterator for Iter<'_, T> {}

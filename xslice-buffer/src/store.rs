use crate::error::Result;
use std::fmt;
use std::marker::PhantomData;
use xslice_common::alloc::RawArray;
use xslice_common::byte_repr::ByteRepr;

/// Store is the backing memory of views: a fixed number of elements
/// allocated once and never resized.
///
/// Stores are shared through `Rc`, and elements are read and written by
/// value through a shared reference, so a write by one view is seen by
/// every other view of the same store.
pub struct Store<T> {
    raw: RawArray,
    size: usize,
    _marker: PhantomData<T>,
}

impl<T: ByteRepr> Store<T> {
    /// Allocate a store of `size` zeroed elements.
    #[inline]
    pub fn new(size: usize) -> Result<Self> {
        let raw = RawArray::with_elems::<T>(size)?;
        log::trace!("allocate store: size={}, bytes={}", size, raw.cap_u8());
        Ok(Store {
            raw,
            size,
            _marker: PhantomData,
        })
    }

    /// Returns number of elements the store holds.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns identity of the store, stable during its lifetime.
    #[inline]
    pub fn id(&self) -> usize {
        self.raw.addr()
    }

    #[inline]
    pub fn get(&self, pos: usize) -> T {
        assert!(pos < self.size, "store position {} out of {}", pos, self.size);
        // # SAFETY
        //
        // Position is checked above, and the raw array never hands out
        // references into its memory.
        unsafe { self.raw.read(pos) }
    }

    #[inline]
    pub fn set(&self, pos: usize, val: T) {
        assert!(pos < self.size, "store position {} out of {}", pos, self.size);
        // # SAFETY
        //
        // Same as `get`.
        unsafe { self.raw.write(pos, val) }
    }

    /// Copy `n` elements from `src[src_pos..]` to `self[dst_pos..]`.
    /// Overlapping ranges of the same store are allowed.
    #[inline]
    pub fn copy_from(&self, dst_pos: usize, src: &Store<T>, src_pos: usize, n: usize) {
        assert!(dst_pos + n <= self.size);
        assert!(src_pos + n <= src.size);
        // # SAFETY
        //
        // Both ranges are checked above.
        unsafe { self.raw.copy_from::<T>(dst_pos, &src.raw, src_pos, n) }
    }
}

impl<T: ByteRepr + fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("id", &self.id())
            .field("size", &self.size)
            .finish()
    }
}

use crate::byte_repr::ByteRepr;
use crate::error::{Error, Result};
use std::alloc::Layout;
use std::mem::{align_of, size_of};
use std::ptr::NonNull;

/// All memory allocations are aligned to 16 bytes.
pub const ALIGNMENT: usize = 16;

/// align length to 16 bytes.
#[inline]
pub fn align_u128(v: usize) -> usize {
    (v + 15) & !15
}

/// This method allocates zeroed memory area with alignment of 16 bytes.
/// The unit of input capacity is byte.
/// If it's not multiple of 16, it will be rounded up to.
///
/// Raw pointer is returned, or error if the allocator refuses the request.
/// Caller should always call free_aligned to release the memory.
#[inline]
fn alloc_zeroed(cap: usize) -> Result<(*mut u8, usize)> {
    if cap > isize::MAX as usize - ALIGNMENT {
        return Err(Error::AllocOverflow(cap));
    }
    let cap = align_u128(usize::max(ALIGNMENT, cap));
    let layout = Layout::from_size_align(cap, ALIGNMENT).map_err(|_| Error::AllocOverflow(cap))?;
    // # SAFETY
    //
    // Layout has non-zero size.
    let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
    if ptr.is_null() {
        return Err(Error::AllocOverflow(cap));
    }
    Ok((ptr, cap))
}

/// Release memory allocated by [`alloc_zeroed`].
///
/// # Safety
///
/// Caller must guarantee the input pointer and size is identical to
/// the returned value of `alloc_zeroed`, and only call this method
/// once. After this call, the memory must not be used.
#[inline]
unsafe fn free_aligned(ptr: *mut u8, cap: usize) {
    assert!(cap % ALIGNMENT == 0);
    std::alloc::dealloc(ptr, Layout::from_size_align_unchecked(cap, ALIGNMENT));
}

/// RawArray is a fixed-size, zero-initialized and 16-byte aligned byte array.
///
/// It never reallocates. Element access goes through raw pointers so that
/// multiple owners of a shared RawArray can read and write it without
/// holding a mutable borrow. No slice into the memory is ever handed out,
/// which keeps such shared writes sound in single-threaded use.
#[derive(Debug)]
pub struct RawArray {
    ptr: NonNull<u8>,
    cap_u8: usize,
}

impl Drop for RawArray {
    #[inline]
    fn drop(&mut self) {
        // # SAFETY
        //
        // The pointer and capacity are guaranteed to be always valid.
        unsafe { free_aligned(self.ptr.as_ptr(), self.cap_u8) }
    }
}

impl RawArray {
    /// Create a new zeroed raw array with given capacity.
    /// Note: capacity is always algined to multiple of 16.
    #[inline]
    pub fn with_capacity(cap_u8: usize) -> Result<Self> {
        let (ptr, cap_u8) = alloc_zeroed(cap_u8)?;
        let ptr = NonNull::new(ptr).ok_or(Error::AllocOverflow(cap_u8))?;
        Ok(RawArray { ptr, cap_u8 })
    }

    /// Create a raw array able to hold `len` elements of type T.
    #[inline]
    pub fn with_elems<T: ByteRepr>(len: usize) -> Result<Self> {
        if align_of::<T>() > ALIGNMENT {
            return Err(Error::UnsupportedAlignment(align_of::<T>()));
        }
        let cap_u8 = len
            .checked_mul(size_of::<T>())
            .ok_or(Error::AllocOverflow(usize::MAX))?;
        RawArray::with_capacity(cap_u8)
    }

    /// Returns byte capacity.
    #[inline]
    pub fn cap_u8(&self) -> usize {
        self.cap_u8
    }

    /// Returns the address of the first byte, used as identity.
    #[inline]
    pub fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// Read element at given index.
    ///
    /// # Safety
    ///
    /// 1. `(idx + 1) * size_of::<T>()` must be within capacity.
    /// 2. No mutable reference to the memory is alive.
    #[inline]
    pub unsafe fn read<T: ByteRepr>(&self, idx: usize) -> T {
        debug_assert!((idx + 1) * size_of::<T>() <= self.cap_u8);
        std::ptr::read((self.ptr.as_ptr() as *const T).add(idx))
    }

    /// Write element at given index.
    ///
    /// # Safety
    ///
    /// 1. `(idx + 1) * size_of::<T>()` must be within capacity.
    /// 2. No other reference to the memory is alive.
    #[inline]
    pub unsafe fn write<T: ByteRepr>(&self, idx: usize, val: T) {
        debug_assert!((idx + 1) * size_of::<T>() <= self.cap_u8);
        std::ptr::write((self.ptr.as_ptr() as *mut T).add(idx), val)
    }

    /// Copy `n` elements from `src` starting at `src_idx` into `self`
    /// starting at `dst_idx`. Source and target may be the same array
    /// with overlapping ranges.
    ///
    /// # Safety
    ///
    /// Both ranges must be within capacity of their arrays, and no
    /// reference to either memory is alive.
    #[inline]
    pub unsafe fn copy_from<T: ByteRepr>(
        &self,
        dst_idx: usize,
        src: &RawArray,
        src_idx: usize,
        n: usize,
    ) {
        debug_assert!((dst_idx + n) * size_of::<T>() <= self.cap_u8);
        debug_assert!((src_idx + n) * size_of::<T>() <= src.cap_u8);
        let src_ptr = (src.ptr.as_ptr() as *const T).add(src_idx);
        let dst_ptr = (self.ptr.as_ptr() as *mut T).add(dst_idx);
        std::ptr::copy(src_ptr, dst_ptr, n)
    }
}
